//! Repository layer for database operations

pub mod books;
pub mod copies;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{BookCopy, BookTitle, CopyData},
};

/// Store operations used by the catalog services.
///
/// Copy ids are taken as opaque strings: an id that the store cannot parse
/// behaves like an id with no record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All books (id and title), ordered by title
    async fn books_list_titles(&self) -> AppResult<Vec<BookTitle>>;

    /// All copies with their book resolved
    async fn copies_list(&self) -> AppResult<Vec<BookCopy>>;

    /// One copy with its book resolved
    async fn copies_find(&self, id: &str) -> AppResult<Option<BookCopy>>;

    async fn copies_create(&self, data: &CopyData) -> AppResult<BookCopy>;

    /// Replace the mutable fields of a copy; `None` when no copy has this id
    async fn copies_update(&self, id: &str, data: &CopyData) -> AppResult<Option<BookCopy>>;

    /// Remove a copy; removing a missing copy is not an error
    async fn copies_delete(&self, id: &str) -> AppResult<()>;

    /// Round trip to the store, for readiness checks
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed store holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn books_list_titles(&self) -> AppResult<Vec<BookTitle>> {
        self.books_list_titles().await
    }

    async fn copies_list(&self) -> AppResult<Vec<BookCopy>> {
        self.copies_list().await
    }

    async fn copies_find(&self, id: &str) -> AppResult<Option<BookCopy>> {
        self.copies_find(id).await
    }

    async fn copies_create(&self, data: &CopyData) -> AppResult<BookCopy> {
        self.copies_create(data).await
    }

    async fn copies_update(&self, id: &str, data: &CopyData) -> AppResult<Option<BookCopy>> {
        self.copies_update(id, data).await
    }

    async fn copies_delete(&self, id: &str) -> AppResult<()> {
        self.copies_delete(id).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
