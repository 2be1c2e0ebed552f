//! Comment Workflow - validate and attach a comment to a post.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FieldError, valid_email};
use crate::domain::Comment;
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository};

/// What the commenter typed. Echoed back verbatim on rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInput {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Outcome of a submission.
///
/// `Created` carries the persisted comment; the caller should navigate to
/// the post's detail view. `Rejected` carries the untouched input plus the
/// field errors, and nothing was persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommentOutcome {
    Created { comment: Comment },
    Rejected { input: CommentInput, errors: Vec<FieldError> },
}

/// Attaches comments on behalf of authenticated actors. The route layer
/// guarantees `actor_id` belongs to an authenticated user before calling in.
#[derive(Clone)]
pub struct CommentWorkflow {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentWorkflow {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    /// Submit a comment on `post_id`.
    ///
    /// Resubmitting the same input creates a duplicate comment; the model
    /// has no de-duplication key and none is promised.
    pub async fn submit_comment(
        &self,
        post_id: Uuid,
        actor_id: Uuid,
        input: CommentInput,
    ) -> Result<CommentOutcome, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::not_found("Post", post_id))?;

        let errors = validate(&input);
        if !errors.is_empty() {
            return Ok(CommentOutcome::Rejected { input, errors });
        }

        // Blank email fields fall back to the placeholder address.
        let email = input
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let comment = self
            .comments
            .insert(Comment::new(post.id, actor_id, input.text, email))
            .await?;

        tracing::info!(post_id = %post.id, comment_id = %comment.id, "comment attached");

        Ok(CommentOutcome::Created { comment })
    }
}

fn validate(input: &CommentInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if input.text.trim().is_empty() {
        errors.push(FieldError::new("text", "Comment text must not be empty"));
    }

    if let Some(email) = input.email.as_deref() {
        let email = email.trim();
        if !email.is_empty() && !valid_email(email) {
            errors.push(FieldError::new("email", "Enter a valid email address"));
        }
    }

    errors
}
