use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image entity - a file attached to a post.
///
/// `file` is an opaque storage reference; upload mechanics live behind an
/// external collaborator. Deleting the owning post deletes its images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: Uuid,
    pub post_id: Uuid,
    pub file: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Image {
    pub fn new(post_id: Uuid, file: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            file,
            uploaded_at: Utc::now(),
        }
    }
}
