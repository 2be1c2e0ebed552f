//! Category creation - where the Slug Allocator meets the store.

use crate::domain::Category;
use crate::error::{DomainError, RepoError};
use crate::ports::CategoryRepository;
use crate::slug::{SlugCandidates, slugify};

/// Create a category, assigning a unique slug when none is given.
///
/// Candidates are probed against the store and the first unused one is
/// attempted. Two workers can still race to the same candidate between the
/// probe and the insert; the store reports that as a constraint violation
/// and the allocator moves on to the next candidate. An explicitly supplied
/// slug is used verbatim and a collision on it is surfaced to the caller.
pub async fn create_category(
    categories: &dyn CategoryRepository,
    name: &str,
    explicit_slug: Option<String>,
) -> Result<Category, DomainError> {
    let mut category = Category::new(name.trim().to_string());

    if let Some(slug) = explicit_slug {
        category.slug = Some(slug);
        return categories.insert(category).await.map_err(Into::into);
    }

    let base = slugify(&category.name);
    let mut attempts = 0usize;

    for candidate in SlugCandidates::new(base) {
        if categories.slug_exists(&candidate).await? {
            continue;
        }

        category.slug = Some(candidate);
        match categories.insert(category.clone()).await {
            Ok(created) => {
                tracing::debug!(
                    slug = created.slug.as_deref().unwrap_or_default(),
                    attempts,
                    "category slug assigned"
                );
                return Ok(created);
            }
            // Lost the race for this candidate; keep walking the sequence.
            Err(RepoError::Constraint(_)) => {
                attempts += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    unreachable!("slug candidate sequence is infinite")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::ports::BaseRepository;

    /// Store double that tracks assigned slugs and can be primed to fail
    /// the first insert of a given slug, as a raced writer would cause.
    #[derive(Default)]
    struct RacingCategoryStore {
        slugs: Mutex<Vec<String>>,
        fail_once_on: Mutex<Option<String>>,
    }

    #[async_trait]
    impl BaseRepository<Category, Uuid> for RacingCategoryStore {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Category>, RepoError> {
            Ok(None)
        }

        async fn save(&self, category: Category) -> Result<Category, RepoError> {
            Ok(category)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl CategoryRepository for RacingCategoryStore {
        async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Category>, RepoError> {
            Ok(None)
        }

        async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
            Ok(self.slugs.lock().unwrap().iter().any(|s| s == slug))
        }

        async fn insert(&self, category: Category) -> Result<Category, RepoError> {
            let slug = category.slug.clone().unwrap_or_default();

            let mut fail_once = self.fail_once_on.lock().unwrap();
            if fail_once.as_deref() == Some(slug.as_str()) {
                // The raced writer persisted this slug between our probe
                // and this insert.
                fail_once.take();
                self.slugs.lock().unwrap().push(slug.clone());
                return Err(RepoError::Constraint(format!("slug {slug} taken")));
            }
            drop(fail_once);

            let mut slugs = self.slugs.lock().unwrap();
            if slugs.iter().any(|s| s == &slug) {
                return Err(RepoError::Constraint(format!("slug {slug} taken")));
            }
            slugs.push(slug);
            Ok(category)
        }
    }

    #[tokio::test]
    async fn first_category_gets_the_base_slug() {
        let store = RacingCategoryStore::default();

        let category = create_category(&store, "Tech News", None).await.unwrap();

        assert_eq!(category.slug.as_deref(), Some("tech-news"));
    }

    #[tokio::test]
    async fn repeated_names_get_increasing_suffixes() {
        let store = RacingCategoryStore::default();

        let first = create_category(&store, "Tech News", None).await.unwrap();
        let second = create_category(&store, "Tech News", None).await.unwrap();
        let third = create_category(&store, "Tech News", None).await.unwrap();

        assert_eq!(first.slug.as_deref(), Some("tech-news"));
        assert_eq!(second.slug.as_deref(), Some("tech-news-1"));
        assert_eq!(third.slug.as_deref(), Some("tech-news-2"));
    }

    #[tokio::test]
    async fn insert_conflict_retries_with_next_candidate() {
        let store = RacingCategoryStore::default();
        *store.fail_once_on.lock().unwrap() = Some("tech-news".to_string());

        let category = create_category(&store, "Tech News", None).await.unwrap();

        assert_eq!(category.slug.as_deref(), Some("tech-news-1"));
    }

    #[tokio::test]
    async fn explicit_slug_is_used_verbatim() {
        let store = RacingCategoryStore::default();

        let category = create_category(&store, "Tech News", Some("news".to_string()))
            .await
            .unwrap();

        assert_eq!(category.slug.as_deref(), Some("news"));
    }

    #[tokio::test]
    async fn explicit_slug_conflict_is_surfaced() {
        let store = RacingCategoryStore::default();
        create_category(&store, "News", Some("news".to_string()))
            .await
            .unwrap();

        let result = create_category(&store, "Other", Some("news".to_string())).await;

        assert!(matches!(result, Err(DomainError::Duplicate(_))));
    }
}
