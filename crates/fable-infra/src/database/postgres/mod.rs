//! PostgreSQL repository implementations.

mod category;
mod comment;
mod image;
mod post;
mod tag;
mod user;

pub use category::PostgresCategoryRepository;
pub use comment::PostgresCommentRepository;
pub use image::PostgresImageRepository;
pub use post::PostgresPostRepository;
pub use tag::PostgresTagRepository;
pub use user::PostgresUserRepository;

use fable_core::error::RepoError;

/// Map a SeaORM error, routing unique-index violations to
/// [`RepoError::Constraint`] so callers can react to lost races.
pub(crate) fn map_db_err(e: sea_orm::DbErr) -> RepoError {
    let msg = e.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Constraint(msg)
    } else {
        RepoError::Query(msg)
    }
}
