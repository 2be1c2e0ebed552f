//! In-memory content store - used when no database is configured, and by
//! the workflow tests. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use fable_core::domain::{Category, Comment, Image, Post, Tag, User};
use fable_core::error::RepoError;
use fable_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, ImageRepository, PostFilter, PostPage,
    PostRepository, TagRepository, UserRepository,
};
use fable_core::slug::slugify;

#[derive(Default)]
struct StoreInner {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    categories: HashMap<Uuid, Category>,
    tags: HashMap<Uuid, Tag>,
    comments: HashMap<Uuid, Comment>,
    images: HashMap<Uuid, Image>,
}

impl StoreInner {
    /// Cascade rules the database would otherwise enforce.
    fn delete_post_cascading(&mut self, post_id: Uuid) {
        self.posts.remove(&post_id);
        self.comments.retain(|_, c| c.post_id != post_id);
        self.images.retain(|_, i| i.post_id != post_id);
    }

    fn delete_user_cascading(&mut self, user_id: Uuid) {
        self.users.remove(&user_id);
        let owned: Vec<Uuid> = self
            .posts
            .values()
            .filter(|p| p.author_id == user_id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            self.delete_post_cascading(post_id);
        }
        self.comments.retain(|_, c| c.author_id != user_id);
    }

    fn slug_taken(&self, slug: &str, excluding: Option<Uuid>) -> bool {
        self.categories
            .values()
            .any(|c| Some(c.id) != excluding && c.slug.as_deref() == Some(slug))
    }
}

/// One RwLock'd store backing every repository port.
///
/// A single `Arc<MemoryStore>` is handed out as each `Arc<dyn ...Repository>`
/// the application state needs.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(post: &Post, filter: &PostFilter) -> bool {
    match filter {
        PostFilter::All => true,
        PostFilter::Tag(slug) => post.has_tag(slug),
        PostFilter::Category(slug) => post.has_category(slug),
    }
}

fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut inner = self.inner.write().await;
        let clash = inner.users.values().any(|u| {
            u.id != entity.id && (u.username == entity.username || u.email == entity.email)
        });
        if clash {
            return Err(RepoError::Constraint(
                "username or email already taken".to_string(),
            ));
        }
        inner.users.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        inner.delete_user_cascading(id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username_or_email(&self, ident: &str) -> Result<Option<User>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.username == ident || u.email == ident)
            .cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        self.inner.write().await.posts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        if !inner.posts.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        inner.delete_post_cascading(id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<PostPage, RepoError> {
        let mut items: Vec<Post> = self
            .inner
            .read()
            .await
            .posts
            .values()
            .filter(|p| matches(p, filter))
            .cloned()
            .collect();
        sort_newest_first(&mut items);

        let total = items.len() as u64;
        // Page numbers come straight from the query string; a huge one must
        // land on an empty page, not overflow the window arithmetic.
        let start = page.saturating_sub(1).saturating_mul(page_size);
        let start = usize::try_from(start).unwrap_or(usize::MAX);
        let items = items
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Ok(PostPage {
            items,
            page,
            page_size,
            total,
        })
    }

    async fn find_latest(&self, n: u64) -> Result<Vec<Post>, RepoError> {
        let mut items: Vec<Post> = self.inner.read().await.posts.values().cloned().collect();
        sort_newest_first(&mut items);
        items.truncate(n as usize);
        Ok(items)
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self.inner.read().await.categories.get(&id).cloned())
    }

    async fn save(&self, entity: Category) -> Result<Category, RepoError> {
        let mut inner = self.inner.write().await;
        if let Some(slug) = entity.slug.as_deref() {
            if inner.slug_taken(slug, Some(entity.id)) {
                return Err(RepoError::Constraint(format!("slug {slug} taken")));
            }
        }
        inner.categories.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        if inner.categories.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // Only the associations go; posts stay.
        for post in inner.posts.values_mut() {
            post.categories.retain(|c| c.id != id);
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
        let mut all: Vec<Category> = self.inner.read().await.categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .categories
            .values()
            .find(|c| c.slug.as_deref() == Some(slug))
            .cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        Ok(self.inner.read().await.slug_taken(slug, None))
    }

    async fn insert(&self, entity: Category) -> Result<Category, RepoError> {
        let mut inner = self.inner.write().await;
        if let Some(slug) = entity.slug.as_deref() {
            if inner.slug_taken(slug, None) {
                return Err(RepoError::Constraint(format!("slug {slug} taken")));
            }
        }
        inner.categories.insert(entity.id, entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Tag>, RepoError> {
        let mut all: Vec<Tag> = self.inner.read().await.tags.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.tags.values().find(|t| t.slug == slug).cloned())
    }

    async fn find_or_create(&self, name: &str) -> Result<Tag, RepoError> {
        let slug = slugify(name);
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.tags.values().find(|t| t.slug == slug) {
            return Ok(existing.clone());
        }
        let tag = Tag::new(name.to_string());
        inner.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn insert(&self, entity: Comment) -> Result<Comment, RepoError> {
        self.inner
            .write()
            .await
            .comments
            .insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let mut comments: Vec<Comment> = self
            .inner
            .read()
            .await
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.comments.values().filter(|c| c.post_id == post_id).count() as u64)
    }
}

#[async_trait]
impl ImageRepository for MemoryStore {
    async fn insert(&self, entity: Image) -> Result<Image, RepoError> {
        self.inner
            .write()
            .await
            .images
            .insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Image>, RepoError> {
        let mut images: Vec<Image> = self
            .inner
            .read()
            .await
            .images
            .values()
            .filter(|i| i.post_id == post_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at));
        Ok(images)
    }

    async fn first_for_post(&self, post_id: Uuid) -> Result<Option<Image>, RepoError> {
        Ok(ImageRepository::list_for_post(self, post_id)
            .await?
            .into_iter()
            .next())
    }
}
