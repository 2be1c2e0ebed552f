use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder contact address for comments submitted without one.
pub const DEFAULT_COMMENT_EMAIL: &str = "default@example.com";

/// Comment entity - attached to a post by an authenticated author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, author_id: Uuid, text: String, email: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            text,
            email: email.unwrap_or_else(|| DEFAULT_COMMENT_EMAIL.to_string()),
            created_at: Utc::now(),
        }
    }
}
