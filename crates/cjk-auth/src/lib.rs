//! # cjk-auth
//!
//! Client-side session core for the CJK portal.
//!
//! - [`store`]: persistence of the credential pair.
//! - [`codec`]: unverified decoding of access token claims for expiry estimation.
//! - [`AuthClient`]: refresh protocol, ensure-valid-access, the authorized
//!   request layer, login and registration.
//! - [`session`]: the session controller consumed by UI surfaces.

pub mod client;
pub mod clock;
pub mod codec;
pub mod login;
pub mod refresh;
pub mod registration;
pub mod request;
pub mod session;
pub mod store;
pub mod transport;

pub use client::AuthClient;
pub use clock::{Clock, SystemClock};
pub use registration::{validate_username, PasswordChecks, PasswordStrength};
pub use request::RequestInit;
pub use session::{Session, SessionController, SessionState};
pub use store::{DetachedTokenStore, FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method};

#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
