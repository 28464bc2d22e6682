//! PostgreSQL store integration tests
//!
//! These need a reachable database. Run with:
//! `DATABASE_URL=postgres://... cargo test --test store_tests -- --ignored`

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use uuid::Uuid;

use shelfmark::{
    models::{CopyData, CopyStatus},
    repository::{CatalogStore, Repository},
    AppError,
};

/// Connect to `DATABASE_URL` and bring the schema up to date
async fn connect() -> Pool<Postgres> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Insert a book with a title no other test run will reuse
async fn seed_book(pool: &Pool<Postgres>, label: &str) -> (Uuid, String) {
    let id = Uuid::new_v4();
    let title = format!("{} {}", label, id);
    sqlx::query("INSERT INTO books (id, title) VALUES ($1, $2)")
        .bind(id)
        .bind(&title)
        .execute(pool)
        .await
        .expect("Failed to insert book");
    (id, title)
}

fn copy_data(book_id: Uuid, imprint: &str, status: CopyStatus, due_back: Option<NaiveDate>) -> CopyData {
    CopyData {
        book: book_id.to_string(),
        imprint: imprint.to_string(),
        status,
        due_back,
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_copy_lifecycle() {
    let pool = connect().await;
    let (book_id, title) = seed_book(&pool, "Dune").await;
    let (other_book_id, other_title) = seed_book(&pool, "Hyperion").await;
    let store: Arc<dyn CatalogStore> = Arc::new(Repository::new(pool));

    // Create
    let created = store
        .copies_create(&copy_data(
            book_id,
            "Chilton, 1965",
            CopyStatus::Loaned,
            NaiveDate::from_ymd_opt(2026, 11, 2),
        ))
        .await
        .expect("create failed");
    assert_eq!(created.book_id, book_id);
    assert_eq!(created.book_title, title);
    assert_eq!(created.imprint, "Chilton, 1965");
    assert_eq!(created.status, "Loaned");
    assert_eq!(created.due_back, NaiveDate::from_ymd_opt(2026, 11, 2));

    // Find
    let found = store
        .copies_find(&created.id.to_string())
        .await
        .expect("find failed")
        .expect("created copy not found");
    assert_eq!(found.id, created.id);
    assert_eq!(found.book_title, title);

    let listed = store.copies_list().await.expect("list failed");
    assert!(listed.iter().any(|c| c.id == created.id));

    // Update keeps the id and replaces every field
    let updated = store
        .copies_update(
            &created.id.to_string(),
            &copy_data(other_book_id, "Ace, 1990", CopyStatus::Available, None),
        )
        .await
        .expect("update failed")
        .expect("updated copy not found");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.book_id, other_book_id);
    assert_eq!(updated.book_title, other_title);
    assert_eq!(updated.imprint, "Ace, 1990");
    assert_eq!(updated.status, "Available");
    assert_eq!(updated.due_back, None);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    // Delete
    store
        .copies_delete(&created.id.to_string())
        .await
        .expect("delete failed");
    let gone = store
        .copies_find(&created.id.to_string())
        .await
        .expect("find after delete failed");
    assert!(gone.is_none());
}

#[tokio::test]
#[ignore]
async fn test_update_unknown_copy_returns_none() {
    let pool = connect().await;
    let (book_id, _) = seed_book(&pool, "Solaris").await;
    let store = Repository::new(pool);
    let data = copy_data(book_id, "Walker, 1970", CopyStatus::Available, None);

    let dangling = store
        .copies_update(&Uuid::new_v4().to_string(), &data)
        .await
        .expect("update failed");
    assert!(dangling.is_none());

    let malformed = store
        .copies_update("not-a-uuid", &data)
        .await
        .expect("update failed");
    assert!(malformed.is_none());
}

#[tokio::test]
#[ignore]
async fn test_find_unknown_copy_returns_none() {
    let store = Repository::new(connect().await);

    assert!(store
        .copies_find(&Uuid::new_v4().to_string())
        .await
        .expect("find failed")
        .is_none());
    assert!(store
        .copies_find("not-a-uuid")
        .await
        .expect("find failed")
        .is_none());
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_copy_is_noop() {
    let pool = connect().await;
    let (book_id, _) = seed_book(&pool, "Ubik").await;
    let store = Repository::new(pool);

    let kept = store
        .copies_create(&copy_data(book_id, "Doubleday, 1969", CopyStatus::Reserved, None))
        .await
        .expect("create failed");

    store
        .copies_delete(&Uuid::new_v4().to_string())
        .await
        .expect("delete of missing id failed");
    store
        .copies_delete("not-a-uuid")
        .await
        .expect("delete of malformed id failed");

    let still_there = store
        .copies_find(&kept.id.to_string())
        .await
        .expect("find failed");
    assert!(still_there.is_some());

    store
        .copies_delete(&kept.id.to_string())
        .await
        .expect("cleanup failed");
}

#[tokio::test]
#[ignore]
async fn test_create_with_dangling_book_is_database_error() {
    let store = Repository::new(connect().await);

    let result = store
        .copies_create(&copy_data(Uuid::new_v4(), "Nowhere, 2000", CopyStatus::Maintenance, None))
        .await;
    assert!(matches!(result, Err(AppError::Database(_))));

    let mut malformed = copy_data(Uuid::nil(), "Nowhere, 2000", CopyStatus::Maintenance, None);
    malformed.book = "not-a-uuid".to_string();
    let result = store.copies_create(&malformed).await;
    assert!(matches!(result, Err(AppError::Database(_))));
}

#[tokio::test]
#[ignore]
async fn test_books_list_titles_and_ping() {
    let pool = connect().await;
    let (book_id, title) = seed_book(&pool, "Neuromancer").await;
    let store: Arc<dyn CatalogStore> = Arc::new(Repository::new(pool));

    let books = store.books_list_titles().await.expect("list titles failed");
    assert!(books.iter().any(|b| b.id == book_id && b.title == title));

    store.ping().await.expect("ping failed");
}
