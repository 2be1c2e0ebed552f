//! Write-path workflows: category creation, commenting, sharing.

pub mod category;
pub mod comment;
pub mod share;

use serde::{Deserialize, Serialize};

/// A single field-level validation message, returned alongside the rejected
/// input so the caller can redisplay the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Minimal address check: one `@` with non-empty, whitespace-free sides.
pub(crate) fn valid_email(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !address.chars().any(char::is_whitespace)
                && !domain.starts_with('.')
                && domain.contains('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::valid_email;

    #[test]
    fn accepts_plain_addresses() {
        assert!(valid_email("reader@example.com"));
        assert!(valid_email("a.b+c@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!valid_email(""));
        assert!(!valid_email("no-at-sign"));
        assert!(!valid_email("@example.com"));
        assert!(!valid_email("user@"));
        assert!(!valid_email("user@@"));
        assert!(!valid_email("user name@example.com"));
        assert!(!valid_email("user@localhost"));
    }
}
