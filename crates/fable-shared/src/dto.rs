//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login. One field accepts either the username or the email,
/// matching the classic combined login form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

/// A tag as shown in navigation panels and on posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub name: String,
    pub slug: String,
}

/// A category as shown in navigation panels and on posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: Option<String>,
}

/// A post as it appears in listings and detail views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub author_id: Uuid,
    pub status: String,
    pub cover_image: Option<String>,
    pub categories: Vec<CategoryResponse>,
    pub tags: Vec<TagResponse>,
}

/// A paginated listing plus its navigation context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    pub posts: Vec<PostResponse>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub tags: Vec<TagResponse>,
    pub categories: Vec<CategoryResponse>,
    pub latest: Vec<PostResponse>,
}

/// A comment as returned under a post detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Post detail: the post, its comments and images, and navigation context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
    pub images: Vec<String>,
    pub tags: Vec<TagResponse>,
    pub categories: Vec<CategoryResponse>,
    pub latest: Vec<PostResponse>,
}

/// Comment submission form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentFormRequest {
    pub text: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Share-a-post form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    pub post_id: Uuid,
    pub email: String,
}

/// Request to create a category. The slug is optional; when omitted the
/// server assigns a unique one derived from the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}
