//! Sharing Workflow - mail a plaintext post summary to a recipient.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FieldError, valid_email};
use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{ImageRepository, MailMessage, Mailer, PostRepository, UserRepository};

/// Marker used in the summary when a post has no attached image.
const NO_IMAGE_MARKER: &str = "(no image)";

/// Outcome of a share request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ShareOutcome {
    Sent {
        post_id: Uuid,
    },
    /// The post does not exist. The route answers with a plain redirect to
    /// the index and no mail goes out.
    PostMissing,
    Rejected {
        recipient: String,
        errors: Vec<FieldError>,
    },
    /// The mail collaborator failed. Surfaced as a user-visible warning
    /// instead of silently pretending the mail went out.
    DeliveryFailed {
        post_id: Uuid,
        reason: String,
    },
}

/// Composes share mails and hands them to the mail collaborator.
#[derive(Clone)]
pub struct SharingWorkflow {
    posts: Arc<dyn PostRepository>,
    images: Arc<dyn ImageRepository>,
    users: Arc<dyn UserRepository>,
    mailer: Arc<dyn Mailer>,
    /// Sender address from startup configuration, never ambient state.
    from_address: String,
}

impl SharingWorkflow {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        images: Arc<dyn ImageRepository>,
        users: Arc<dyn UserRepository>,
        mailer: Arc<dyn Mailer>,
        from_address: String,
    ) -> Self {
        Self {
            posts,
            images,
            users,
            mailer,
            from_address,
        }
    }

    /// Share `post_id` with `recipient`.
    pub async fn share_post(
        &self,
        post_id: Uuid,
        recipient: &str,
    ) -> Result<ShareOutcome, DomainError> {
        let Some(post) = self.posts.find_by_id(post_id).await? else {
            tracing::debug!(%post_id, "share requested for unknown post");
            return Ok(ShareOutcome::PostMissing);
        };

        let recipient = recipient.trim();
        if !valid_email(recipient) {
            return Ok(ShareOutcome::Rejected {
                recipient: recipient.to_string(),
                errors: vec![FieldError::new("email", "Enter a valid email address")],
            });
        }

        let author = self.users.find_by_id(post.author_id).await?;
        let author_name = author
            .map(|u| u.username)
            .unwrap_or_else(|| "unknown".to_string());

        let image_line = match self.images.first_for_post(post.id).await? {
            Some(image) => image.file,
            None => NO_IMAGE_MARKER.to_string(),
        };

        let message = MailMessage {
            subject: format!("Read \"{}\" on Fable", post.title),
            body: compose_summary(&post, &author_name, &image_line),
            from: self.from_address.clone(),
            to: vec![recipient.to_string()],
        };

        match self.mailer.send(message).await {
            Ok(()) => {
                tracing::info!(%post_id, "post shared");
                Ok(ShareOutcome::Sent { post_id })
            }
            Err(e) => {
                tracing::warn!(%post_id, error = %e, "share mail delivery failed");
                Ok(ShareOutcome::DeliveryFailed {
                    post_id,
                    reason: e.to_string(),
                })
            }
        }
    }
}

fn compose_summary(post: &Post, author: &str, image_line: &str) -> String {
    format!(
        "{title}\n\nPublished {date} by {author}\n\n{body}\n\nImage: {image_line}\n",
        title = post.title,
        date = post.date.format("%Y-%m-%d %H:%M UTC"),
        author = author,
        body = post.body,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn sample_post() -> Post {
        let mut post = Post::new(Uuid::new_v4(), "Hello".to_string(), "Body text".to_string());
        post.date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        post
    }

    #[test]
    fn summary_includes_image_url_when_present() {
        let summary = compose_summary(&sample_post(), "alice", "images/cover.png");

        assert!(summary.contains("Hello"));
        assert!(summary.contains("Published 2024-05-01 12:30 UTC by alice"));
        assert!(summary.contains("Body text"));
        assert!(summary.contains("Image: images/cover.png"));
    }

    #[test]
    fn summary_marks_missing_image() {
        let summary = compose_summary(&sample_post(), "alice", NO_IMAGE_MARKER);

        assert!(summary.contains("Image: (no image)"));
    }
}
