//! Slug derivation and candidate generation.
//!
//! `slugify` produces the deterministic base form of a display name; the
//! allocator in [`crate::workflows::category`] walks [`SlugCandidates`]
//! until it finds a form the store accepts.

/// Base form used when a name normalizes to nothing at all.
const EMPTY_NAME_FALLBACK: &str = "category";

/// Normalize a display name into its URL-safe base form.
///
/// Lowercases, keeps alphanumerics, collapses every other run of characters
/// into a single hyphen, and trims hyphens from both ends.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        EMPTY_NAME_FALLBACK.to_string()
    } else {
        slug
    }
}

/// Infinite candidate sequence for a base slug: `base`, `base-1`, `base-2`, ...
///
/// Candidates must be re-probed against the store at every assignment; the
/// sequence itself carries no notion of which forms are taken.
#[derive(Debug, Clone)]
pub struct SlugCandidates {
    base: String,
    next_suffix: u32,
}

impl SlugCandidates {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            next_suffix: 0,
        }
    }
}

impl Iterator for SlugCandidates {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let candidate = if self.next_suffix == 0 {
            self.base.clone()
        } else {
            format!("{}-{}", self.base, self.next_suffix)
        };
        self.next_suffix += 1;
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Tech News"), "tech-news");
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn slugify_is_deterministic() {
        assert_eq!(slugify("Tech News"), slugify("Tech News"));
    }

    #[test]
    fn slugify_keeps_digits() {
        assert_eq!(slugify("Top 10 Posts of 2024"), "top-10-posts-of-2024");
    }

    #[test]
    fn slugify_empty_name_falls_back() {
        assert_eq!(slugify(""), "category");
        assert_eq!(slugify("!!!"), "category");
    }

    #[test]
    fn candidates_append_increasing_suffixes() {
        let mut candidates = SlugCandidates::new("tech-news");
        assert_eq!(candidates.next().as_deref(), Some("tech-news"));
        assert_eq!(candidates.next().as_deref(), Some("tech-news-1"));
        assert_eq!(candidates.next().as_deref(), Some("tech-news-2"));
    }
}
