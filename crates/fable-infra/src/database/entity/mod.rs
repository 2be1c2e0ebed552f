//! SeaORM entity definitions for the content store schema.

pub mod category;
pub mod comment;
pub mod image;
pub mod post;
pub mod post_category;
pub mod post_tag;
pub mod tag;
pub mod user;
