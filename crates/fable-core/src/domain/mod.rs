//! Domain entities - the core business objects.

mod category;
mod comment;
mod image;
mod post;
mod tag;
mod user;

pub use category::Category;
pub use comment::{Comment, DEFAULT_COMMENT_EMAIL};
pub use image::Image;
pub use post::{Post, PostStatus};
pub use tag::Tag;
pub use user::User;
