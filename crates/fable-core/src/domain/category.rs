use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category entity - a curated grouping of posts.
///
/// `slug` is assigned lazily on first save when absent (see [`crate::slug`])
/// and is unique among all categories that carry one. Renaming a category
/// never re-derives its slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: Option<String>,
}

impl Category {
    /// Create a category without a slug; the store assigns one at save time.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            slug: None,
        }
    }
}
