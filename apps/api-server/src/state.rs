//! Application state - shared across all handlers.

use std::sync::Arc;

use fable_core::listing::ListingEngine;
use fable_core::ports::{
    CategoryRepository, CommentRepository, ImageRepository, Mailer, PostRepository, TagRepository,
    UserRepository,
};
use fable_core::workflows::comment::CommentWorkflow;
use fable_core::workflows::share::SharingWorkflow;
use fable_infra::database::{DatabaseConnections, MemoryStore};
use fable_infra::mail::LogMailer;
use fable_infra::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresImageRepository,
    PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// The repository set every component is wired from.
struct Repositories {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
    comments: Arc<dyn CommentRepository>,
    images: Arc<dyn ImageRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            posts: store.clone(),
            categories: store.clone(),
            tags: store.clone(),
            comments: store.clone(),
            images: store,
        }
    }

    fn postgres(db: &DatabaseConnections) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.main.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.main.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.main.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.main.clone())),
            images: Arc::new(PostgresImageRepository::new(db.main.clone())),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub listing: ListingEngine,
    pub comments: CommentWorkflow,
    pub sharing: SharingWorkflow,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let repos = match config.database.as_ref() {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => Repositories::postgres(&connections),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Repositories::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
                Repositories::in_memory()
            }
        };

        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer::new());

        let listing = ListingEngine::new(
            repos.posts.clone(),
            repos.tags.clone(),
            repos.categories.clone(),
            repos.comments.clone(),
            repos.images.clone(),
        );
        let comments = CommentWorkflow::new(repos.posts.clone(), repos.comments.clone());
        let sharing = SharingWorkflow::new(
            repos.posts.clone(),
            repos.images.clone(),
            repos.users.clone(),
            mailer,
            config.share_from_address.clone(),
        );

        tracing::info!("Application state initialized");

        Self {
            users: repos.users,
            categories: repos.categories,
            listing,
            comments,
            sharing,
        }
    }
}
