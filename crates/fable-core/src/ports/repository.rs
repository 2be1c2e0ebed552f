//! Content Store ports - repository traits over the blog entities.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Category, Comment, Image, Post, Tag, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, applying the store's cascade rules.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Predicate selecting a subset of posts for listing.
///
/// Unknown slugs simply match nothing; the filter is pure set membership
/// and never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Tag(String),
    Category(String),
}

/// One page of the filtered, date-descending post sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    pub items: Vec<Post>,
    /// 1-based page number this slice was taken from.
    pub page: u64,
    pub page_size: u64,
    /// Total matches across all pages.
    pub total: u64,
}

impl PostPage {
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }
}

/// User repository with lookup by login identifiers.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Login lookup: the original form accepts either identifier in one field.
    async fn find_by_username_or_email(&self, ident: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository with the composed listing queries.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Page `page` (1-based) of the posts matching `filter`, ordered by
    /// `date` descending (id descending on ties), plus the total count.
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<PostPage, RepoError>;

    /// The `n` most recent posts irrespective of any filter.
    async fn find_latest(&self, n: u64) -> Result<Vec<Post>, RepoError>;
}

/// Category repository; `insert` is the slug allocator's write path.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn list_all(&self) -> Result<Vec<Category>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    /// Existence probe for one candidate slug.
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError>;

    /// Insert a new category. A duplicate slug must surface as
    /// [`RepoError::Constraint`] so the allocator can retry with the next
    /// candidate; the store's unique index is the last-resort invariant.
    async fn insert(&self, category: Category) -> Result<Category, RepoError>;
}

/// Tag repository. Tags are created on demand when first attached.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Tag>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    /// Reuse the row whose slug matches `slugify(name)`, creating it if absent.
    async fn find_or_create(&self, name: &str) -> Result<Tag, RepoError>;
}

/// Comment repository. Comments are append-only.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError>;

    /// Comments for a post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

/// Image repository.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn insert(&self, image: Image) -> Result<Image, RepoError>;

    /// Images for a post, oldest upload first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Image>, RepoError>;

    /// The earliest-uploaded image, used by the share summary.
    async fn first_for_post(&self, post_id: Uuid) -> Result<Option<Image>, RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = PostPage {
            items: Vec::new(),
            page: 1,
            page_size: 3,
            total: 7,
        };
        assert_eq!(page.total_pages(), 3);
    }
}
