//! Likes and comments attached to any content object.

mod comments;
mod likes;
