use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, Tag};

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(format!("unknown post status: {other}")),
        }
    }
}

/// Post entity - a blog article with its loaded associations.
///
/// `date` is set once at creation and never touched again; listings order
/// by it descending. `categories` and `tags` are the loaded many-to-many
/// associations, `cover_image` is an opaque file reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub author_id: Uuid,
    pub status: PostStatus,
    pub cover_image: Option<String>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

impl Post {
    /// Create a new draft post.
    pub fn new(author_id: Uuid, title: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            body,
            date: Utc::now(),
            author_id,
            status: PostStatus::Draft,
            cover_image: None,
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// True when any attached tag carries the given slug.
    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t.slug == slug)
    }

    /// True when any attached category carries the given slug.
    pub fn has_category(&self, slug: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.slug.as_deref() == Some(slug))
    }
}
