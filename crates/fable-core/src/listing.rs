//! Listing Engine - audience-facing read views over the Content Store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Category, Comment, Image, Post, Tag};
use crate::error::DomainError;
use crate::ports::{
    CategoryRepository, CommentRepository, ImageRepository, PostFilter, PostPage, PostRepository,
    TagRepository,
};

/// Listings are fixed at three posts per page.
pub const PAGE_SIZE: u64 = 3;

/// Size of the "recent posts" navigation panel.
pub const LATEST_COUNT: u64 = 3;

/// A paginated view plus the navigation context every listing carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub page: PostPage,
    pub tags: Vec<Tag>,
    pub categories: Vec<Category>,
    pub latest: Vec<Post>,
}

/// A single post with everything its detail view needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub images: Vec<Image>,
    pub tags: Vec<Tag>,
    pub categories: Vec<Category>,
    pub latest: Vec<Post>,
}

/// Read-side facade composing the Content Store queries.
#[derive(Clone)]
pub struct ListingEngine {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
    categories: Arc<dyn CategoryRepository>,
    comments: Arc<dyn CommentRepository>,
    images: Arc<dyn ImageRepository>,
}

impl ListingEngine {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
        categories: Arc<dyn CategoryRepository>,
        comments: Arc<dyn CommentRepository>,
        images: Arc<dyn ImageRepository>,
    ) -> Self {
        Self {
            posts,
            tags,
            categories,
            comments,
            images,
        }
    }

    /// Unfiltered listing. The route layer decides whether a viewer must be
    /// authenticated; the engine itself is auth-agnostic.
    pub async fn index(&self, page: u64) -> Result<Listing, DomainError> {
        self.listing(PostFilter::All, page).await
    }

    /// Posts carrying the given tag slug. Unknown slugs yield an empty page.
    pub async fn tagged(&self, slug: &str, page: u64) -> Result<Listing, DomainError> {
        self.listing(PostFilter::Tag(slug.to_string()), page).await
    }

    /// Posts in the given category slug. Unknown slugs yield an empty page.
    pub async fn categorized(&self, slug: &str, page: u64) -> Result<Listing, DomainError> {
        self.listing(PostFilter::Category(slug.to_string()), page)
            .await
    }

    /// Single post with comments, images, and the navigation context.
    pub async fn post_detail(&self, id: Uuid) -> Result<PostDetail, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Post", id))?;

        Ok(PostDetail {
            comments: self.comments.list_for_post(post.id).await?,
            images: self.images.list_for_post(post.id).await?,
            tags: self.tags.list_all().await?,
            categories: self.categories.list_all().await?,
            latest: self.posts.find_latest(LATEST_COUNT).await?,
            post,
        })
    }

    async fn listing(&self, filter: PostFilter, page: u64) -> Result<Listing, DomainError> {
        let page = page.max(1);
        let post_page = self.posts.find_page(&filter, page, PAGE_SIZE).await?;

        Ok(Listing {
            page: post_page,
            tags: self.tags.list_all().await?,
            categories: self.categories.list_all().await?,
            latest: self.posts.find_latest(LATEST_COUNT).await?,
        })
    }
}
