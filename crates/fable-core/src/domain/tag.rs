use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug::slugify;

/// Tag entity - a free-form label attached to posts.
///
/// The slug is derived from the name at creation; attaching the same label
/// twice reuses the existing row (the slug is the dedup key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(name: String) -> Self {
        let slug = slugify(&name);
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
        }
    }
}
