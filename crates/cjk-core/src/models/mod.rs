//! Wire models exchanged with the remote content API.

pub mod content;
pub mod credentials;
pub mod list;
pub mod member;
pub mod social;

pub use content::{
    Activity, BlogCategory, BlogPost, ContentKind, GalleryItem, MediaKind, NewsItem,
};
pub use credentials::{CredentialPair, LoginRequest, RefreshRequest, TokenResponse};
pub use list::ListResponse;
pub use member::{Member, NewMember};
pub use social::{ContentTarget, LikeResponse, SocialComment};
