//! Book domain methods on Repository

use super::Repository;
use crate::{error::AppResult, models::BookTitle};

impl Repository {
    /// List all books for selection lists
    pub async fn books_list_titles(&self) -> AppResult<Vec<BookTitle>> {
        let rows = sqlx::query_as::<_, BookTitle>("SELECT id, title FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
