use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an author or commenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Sentinel author for posts created without an explicit author.
    ///
    /// Callers that want the system author must pass this id explicitly;
    /// there is no hidden default anywhere in the store.
    pub const SYSTEM_AUTHOR_ID: Uuid = Uuid::nil();

    /// Create a new user with generated ID and timestamp.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// The seeded row backing [`Self::SYSTEM_AUTHOR_ID`].
    pub fn system() -> Self {
        Self {
            id: Self::SYSTEM_AUTHOR_ID,
            username: "system".to_string(),
            email: "system@fable.local".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }
}
