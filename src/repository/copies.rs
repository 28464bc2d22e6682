//! Book copy domain methods on Repository

use chrono::Utc;
use uuid::Uuid;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{BookCopy, CopyData},
};

/// Copies joined with the title of the book they reference
const SELECT_COPY_WITH_BOOK: &str = r#"
    SELECT c.id, c.book_id, b.title AS book_title, c.imprint, c.status, c.due_back,
           c.created_at, c.updated_at
    FROM book_copies c
    JOIN books b ON b.id = c.book_id
"#;

impl Repository {
    /// List all copies, ordered by book title then imprint
    pub async fn copies_list(&self) -> AppResult<Vec<BookCopy>> {
        let query = format!("{} ORDER BY b.title, c.imprint", SELECT_COPY_WITH_BOOK);
        let rows = sqlx::query_as::<_, BookCopy>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a copy by ID
    pub async fn copies_find(&self, id: &str) -> AppResult<Option<BookCopy>> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        self.copies_find_by_uuid(id).await
    }

    async fn copies_find_by_uuid(&self, id: Uuid) -> AppResult<Option<BookCopy>> {
        let query = format!("{} WHERE c.id = $1", SELECT_COPY_WITH_BOOK);
        let row = sqlx::query_as::<_, BookCopy>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Create a copy.
    ///
    /// The book reference is cast by PostgreSQL; a malformed or dangling book
    /// id fails as a database error.
    pub async fn copies_create(&self, data: &CopyData) -> AppResult<BookCopy> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO book_copies (id, book_id, imprint, status, due_back, created_at, updated_at)
            VALUES ($1, $2::uuid, $3, $4, $5, $6, $6)
            "#,
        )
        .bind(id)
        .bind(&data.book)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.copies_find_by_uuid(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Copy {} vanished after insert", id)))
    }

    /// Replace book, imprint, status and due date of a copy
    pub async fn copies_update(&self, id: &str, data: &CopyData) -> AppResult<Option<BookCopy>> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let result = sqlx::query(
            r#"
            UPDATE book_copies SET
                book_id = $1::uuid,
                imprint = $2,
                status = $3,
                due_back = $4,
                updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(&data.book)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.copies_find_by_uuid(id).await
    }

    /// Delete a copy (hard delete, copies have no dependents)
    pub async fn copies_delete(&self, id: &str) -> AppResult<()> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(());
        };
        sqlx::query("DELETE FROM book_copies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
