#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use fable_core::domain::{Category, Comment, Image, Post, PostStatus, Tag, User};
    use fable_core::listing::{LATEST_COUNT, ListingEngine, PAGE_SIZE};
    use fable_core::ports::{
        BaseRepository, CategoryRepository, CommentRepository, ImageRepository, PostFilter,
        PostRepository, TagRepository,
    };
    use fable_core::workflows::category::create_category;
    use fable_core::workflows::comment::{CommentInput, CommentOutcome, CommentWorkflow};
    use fable_core::workflows::share::{ShareOutcome, SharingWorkflow};

    use crate::database::MemoryStore;
    use crate::mail::RecordingMailer;

    async fn seed_author(store: &MemoryStore) -> User {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        BaseRepository::<User, Uuid>::save(store, user).await.unwrap()
    }

    /// A published post dated `day` of January 2024, newest day wins.
    async fn seed_post(store: &MemoryStore, author: &User, title: &str, day: u32) -> Post {
        let mut post = Post::new(author.id, title.to_string(), format!("body of {title}"));
        post.date = Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap();
        post.status = PostStatus::Published;
        BaseRepository::<Post, Uuid>::save(store, post).await.unwrap()
    }

    async fn attach_tag(store: &MemoryStore, post: &Post, tag: &Tag) {
        let mut post = post.clone();
        post.tags.push(tag.clone());
        BaseRepository::<Post, Uuid>::save(store, post).await.unwrap();
    }

    fn engine(store: &Arc<MemoryStore>) -> ListingEngine {
        ListingEngine::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        )
    }

    #[tokio::test]
    async fn tag_filter_returns_exact_subset_newest_first() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        let rust_tag = Tag::new("Rust".to_string());

        let old = seed_post(&store, &author, "old tagged", 1).await;
        let _plain = seed_post(&store, &author, "untagged", 2).await;
        let new = seed_post(&store, &author, "new tagged", 3).await;
        attach_tag(&store, &old, &rust_tag).await;
        attach_tag(&store, &new, &rust_tag).await;

        let page = store
            .find_page(&PostFilter::Tag("rust".to_string()), 1, 10)
            .await
            .unwrap();

        let titles: Vec<&str> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["new tagged", "old tagged"]);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn unknown_tag_slug_yields_empty_page_not_error() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        seed_post(&store, &author, "some post", 1).await;

        let page = store
            .find_page(&PostFilter::Tag("no-such-tag".to_string()), 1, PAGE_SIZE)
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn pagination_window_is_stable() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        for day in 1..=7 {
            seed_post(&store, &author, &format!("post {day}"), day).await;
        }

        // Seven posts, newest first: page 2 of size 3 holds 0-indexed 3..6,
        // which are the posts dated days 4, 3, 2.
        let page = store.find_page(&PostFilter::All, 2, 3).await.unwrap();

        let titles: Vec<&str> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["post 4", "post 3", "post 2"]);
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages(), 3);
    }

    #[tokio::test]
    async fn out_of_range_page_is_empty_not_a_panic() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        for day in 1..=3 {
            seed_post(&store, &author, &format!("post {day}"), day).await;
        }

        // Page numbers arrive unvalidated from the query string.
        let page = store
            .find_page(&PostFilter::All, u64::MAX, PAGE_SIZE)
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn latest_is_a_prefix_of_the_unfiltered_listing() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        for day in 1..=5 {
            seed_post(&store, &author, &format!("post {day}"), day).await;
        }

        let latest = store.find_latest(LATEST_COUNT).await.unwrap();
        let unfiltered = store.find_page(&PostFilter::All, 1, 100).await.unwrap();

        assert_eq!(latest.len(), 3);
        for (latest_post, listed) in latest.iter().zip(unfiltered.items.iter()) {
            assert_eq!(latest_post.id, listed.id);
        }
        assert!(latest.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[tokio::test]
    async fn listing_engine_carries_navigation_context() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        seed_post(&store, &author, "a post", 1).await;
        create_category(&*store, "Tech News", None).await.unwrap();

        let listing = engine(&store).index(1).await.unwrap();

        assert_eq!(listing.page.page_size, PAGE_SIZE);
        assert_eq!(listing.categories.len(), 1);
        assert_eq!(listing.latest.len(), 1);
    }

    #[tokio::test]
    async fn category_slugs_stay_distinct_via_memory_store() {
        let store = MemoryStore::new();

        let first = create_category(&store, "Tech News", None).await.unwrap();
        let second = create_category(&store, "Tech News", None).await.unwrap();

        assert_eq!(first.slug.as_deref(), Some("tech-news"));
        assert_eq!(second.slug.as_deref(), Some("tech-news-1"));
    }

    #[tokio::test]
    async fn attaching_the_same_label_reuses_the_tag() {
        let store = MemoryStore::new();

        let first = store.find_or_create("Rust Tips").await.unwrap();
        let second = store.find_or_create("Rust Tips").await.unwrap();

        assert_eq!(first.id, second.id);
        let found = TagRepository::find_by_slug(&store, "rust-tips")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn category_lookup_by_slug_finds_the_allocated_form() {
        let store = MemoryStore::new();
        let created = create_category(&store, "Tech News", None).await.unwrap();

        let found = CategoryRepository::find_by_slug(&store, "tech-news")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, created.id);
        assert!(
            CategoryRepository::find_by_slug(&store, "no-such-slug")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn empty_comment_is_rejected_and_nothing_persists() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        let post = seed_post(&store, &author, "commented", 1).await;
        let workflow = CommentWorkflow::new(store.clone(), store.clone());

        let outcome = workflow
            .submit_comment(
                post.id,
                author.id,
                CommentInput {
                    text: "   ".to_string(),
                    email: None,
                },
            )
            .await
            .unwrap();

        match outcome {
            CommentOutcome::Rejected { input, errors } => {
                assert_eq!(input.text, "   ");
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "text");
            }
            CommentOutcome::Created { .. } => panic!("empty comment must be rejected"),
        }
        assert_eq!(store.count_for_post(post.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn valid_comment_increments_count_and_credits_the_actor() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        let post = seed_post(&store, &author, "commented", 1).await;
        let workflow = CommentWorkflow::new(store.clone(), store.clone());

        let outcome = workflow
            .submit_comment(
                post.id,
                author.id,
                CommentInput {
                    text: "Nice post".to_string(),
                    email: None,
                },
            )
            .await
            .unwrap();

        let CommentOutcome::Created { comment } = outcome else {
            panic!("valid comment must be created");
        };
        assert_eq!(comment.author_id, author.id);
        assert_eq!(comment.email, "default@example.com");
        assert_eq!(store.count_for_post(post.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn commenting_on_unknown_post_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let workflow = CommentWorkflow::new(store.clone(), store.clone());

        let result = workflow
            .submit_comment(
                Uuid::new_v4(),
                Uuid::new_v4(),
                CommentInput {
                    text: "hello".to_string(),
                    email: None,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(fable_core::DomainError::NotFound { .. })
        ));
    }

    fn sharing(store: &Arc<MemoryStore>, mailer: &Arc<RecordingMailer>) -> SharingWorkflow {
        SharingWorkflow::new(
            store.clone(),
            store.clone(),
            store.clone(),
            mailer.clone(),
            "blog@fable.local".to_string(),
        )
    }

    #[tokio::test]
    async fn sharing_unknown_post_sends_no_mail() {
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        let workflow = sharing(&store, &mailer);

        let outcome = workflow
            .share_post(Uuid::new_v4(), "reader@example.com")
            .await
            .unwrap();

        assert!(matches!(outcome, ShareOutcome::PostMissing));
        assert_eq!(mailer.sent_count().await, 0);
    }

    #[tokio::test]
    async fn sharing_composes_summary_with_first_image() {
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        let author = seed_author(&store).await;
        let post = seed_post(&store, &author, "shared post", 1).await;
        ImageRepository::insert(
            &*store,
            Image::new(post.id, "images/cover.png".to_string()),
        )
        .await
        .unwrap();
        let workflow = sharing(&store, &mailer);

        let outcome = workflow
            .share_post(post.id, "reader@example.com")
            .await
            .unwrap();

        assert!(matches!(outcome, ShareOutcome::Sent { .. }));
        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "blog@fable.local");
        assert_eq!(sent[0].to, vec!["reader@example.com".to_string()]);
        assert!(sent[0].body.contains("shared post"));
        assert!(sent[0].body.contains("by alice"));
        assert!(sent[0].body.contains("Image: images/cover.png"));
    }

    #[tokio::test]
    async fn sharing_without_image_marks_it() {
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        let author = seed_author(&store).await;
        let post = seed_post(&store, &author, "bare post", 1).await;
        let workflow = sharing(&store, &mailer);

        workflow
            .share_post(post.id, "reader@example.com")
            .await
            .unwrap();

        let sent = mailer.sent().await;
        assert!(sent[0].body.contains("Image: (no image)"));
    }

    #[tokio::test]
    async fn sharing_surfaces_delivery_failure() {
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        mailer.fail_with("smtp unreachable").await;
        let author = seed_author(&store).await;
        let post = seed_post(&store, &author, "doomed", 1).await;
        let workflow = sharing(&store, &mailer);

        let outcome = workflow
            .share_post(post.id, "reader@example.com")
            .await
            .unwrap();

        match outcome {
            ShareOutcome::DeliveryFailed { reason, .. } => {
                assert!(reason.contains("smtp unreachable"));
            }
            other => panic!("expected DeliveryFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sharing_rejects_bad_recipient_without_mailing() {
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        let author = seed_author(&store).await;
        let post = seed_post(&store, &author, "a post", 1).await;
        let workflow = sharing(&store, &mailer);

        let outcome = workflow.share_post(post.id, "not-an-address").await.unwrap();

        assert!(matches!(outcome, ShareOutcome::Rejected { .. }));
        assert_eq!(mailer.sent_count().await, 0);
    }

    #[tokio::test]
    async fn deleting_a_post_cascades_to_comments_and_images() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        let post = seed_post(&store, &author, "doomed", 1).await;
        CommentRepository::insert(
            &*store,
            Comment::new(post.id, author.id, "bye".to_string(), None),
        )
        .await
        .unwrap();
        ImageRepository::insert(&*store, Image::new(post.id, "images/x.png".to_string()))
            .await
            .unwrap();

        BaseRepository::<Post, Uuid>::delete(&*store, post.id)
            .await
            .unwrap();

        assert_eq!(store.count_for_post(post.id).await.unwrap(), 0);
        assert!(
            ImageRepository::list_for_post(&*store, post.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn deleting_a_category_only_detaches_posts() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        let category = create_category(&*store, "Tech News", None).await.unwrap();
        let mut post = seed_post(&store, &author, "kept", 1).await;
        post.categories.push(category.clone());
        let post = BaseRepository::<Post, Uuid>::save(&*store, post).await.unwrap();

        BaseRepository::<Category, Uuid>::delete(&*store, category.id)
            .await
            .unwrap();

        let kept = BaseRepository::<Post, Uuid>::find_by_id(&*store, post.id)
            .await
            .unwrap()
            .unwrap();
        assert!(kept.categories.is_empty());
    }

    #[tokio::test]
    async fn deleting_an_author_cascades_to_their_posts() {
        let store = Arc::new(MemoryStore::new());
        let author = seed_author(&store).await;
        let post = seed_post(&store, &author, "orphaned", 1).await;

        BaseRepository::<User, Uuid>::delete(&*store, author.id)
            .await
            .unwrap();

        assert!(
            BaseRepository::<Post, Uuid>::find_by_id(&*store, post.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[cfg(feature = "postgres")]
    mod postgres {
        use std::sync::Arc;

        use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};
        use uuid::Uuid;

        use fable_core::ports::{BaseRepository, TagRepository, UserRepository};

        use crate::database::entity::{category, tag, user};
        use crate::database::postgres::{
            PostgresCategoryRepository, PostgresTagRepository, PostgresUserRepository,
        };

        #[tokio::test]
        async fn find_user_by_email_maps_the_row() {
            let user_id = Uuid::new_v4();
            let now = chrono::Utc::now();

            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![user::Model {
                    id: user_id,
                    username: "alice".to_owned(),
                    email: "alice@example.com".to_owned(),
                    password_hash: "hash".to_owned(),
                    created_at: now.into(),
                }]])
                .into_connection();

            let repo = PostgresUserRepository::new(Arc::new(db));

            let user = repo.find_by_email("alice@example.com").await.unwrap().unwrap();

            assert_eq!(user.id, user_id);
            assert_eq!(user.username, "alice");
        }

        #[tokio::test]
        async fn find_category_by_id_maps_the_row() {
            let category_id = Uuid::new_v4();

            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![category::Model {
                    id: category_id,
                    name: "Tech News".to_owned(),
                    slug: Some("tech-news".to_owned()),
                }]])
                .into_connection();

            let repo = PostgresCategoryRepository::new(Arc::new(db));

            let category = repo.find_by_id(category_id).await.unwrap().unwrap();

            assert_eq!(category.slug.as_deref(), Some("tech-news"));
        }

        #[tokio::test]
        async fn losing_the_tag_insert_race_returns_the_winner_row() {
            let tag_id = Uuid::new_v4();

            // First lookup misses, the insert loses to a raced writer, and
            // the re-select picks up the winner's row.
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![
                    Vec::<tag::Model>::new(),
                    vec![tag::Model {
                        id: tag_id,
                        name: "Rust".to_owned(),
                        slug: "rust".to_owned(),
                    }],
                ])
                .append_exec_errors(vec![DbErr::Query(RuntimeErr::Internal(
                    "duplicate key value violates unique constraint \"tags_slug_key\""
                        .to_owned(),
                ))])
                .into_connection();

            let repo = PostgresTagRepository::new(Arc::new(db));

            let tag = repo.find_or_create("Rust").await.unwrap();

            assert_eq!(tag.id, tag_id);
            assert_eq!(tag.slug, "rust");
        }
    }
}
