//! In-process store used by handler and service tests

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{BookCopy, BookTitle, CopyData},
};

#[derive(Default)]
pub struct MemoryStore {
    books: RwLock<Vec<BookTitle>>,
    copies: RwLock<Vec<BookCopy>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_book(&self, title: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.books.write().await.push(BookTitle {
            id,
            title: title.to_string(),
        });
        id
    }

    pub async fn copies(&self) -> Vec<BookCopy> {
        self.copies.read().await.clone()
    }

    async fn book_title(&self, book: &str) -> AppResult<(Uuid, String)> {
        let books = self.books.read().await;
        books
            .iter()
            .find(|b| b.id.to_string() == book)
            .map(|b| (b.id, b.title.clone()))
            .ok_or_else(|| AppError::Internal(format!("unknown book {}", book)))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn books_list_titles(&self) -> AppResult<Vec<BookTitle>> {
        let mut books = self.books.read().await.clone();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn copies_list(&self) -> AppResult<Vec<BookCopy>> {
        let mut copies = self.copies.read().await.clone();
        copies.sort_by(|a, b| {
            (a.book_title.as_str(), a.imprint.as_str()).cmp(&(b.book_title.as_str(), b.imprint.as_str()))
        });
        Ok(copies)
    }

    async fn copies_find(&self, id: &str) -> AppResult<Option<BookCopy>> {
        let copies = self.copies.read().await;
        Ok(copies.iter().find(|c| c.id.to_string() == id).cloned())
    }

    async fn copies_create(&self, data: &CopyData) -> AppResult<BookCopy> {
        let (book_id, book_title) = self.book_title(&data.book).await?;
        let now = Utc::now();
        let copy = BookCopy {
            id: Uuid::new_v4(),
            book_id,
            book_title,
            imprint: data.imprint.clone(),
            status: data.status.to_string(),
            due_back: data.due_back,
            created_at: now,
            updated_at: now,
        };
        self.copies.write().await.push(copy.clone());
        Ok(copy)
    }

    async fn copies_update(&self, id: &str, data: &CopyData) -> AppResult<Option<BookCopy>> {
        let (book_id, book_title) = self.book_title(&data.book).await?;
        let mut copies = self.copies.write().await;
        let Some(copy) = copies.iter_mut().find(|c| c.id.to_string() == id) else {
            return Ok(None);
        };
        copy.book_id = book_id;
        copy.book_title = book_title;
        copy.imprint = data.imprint.clone();
        copy.status = data.status.to_string();
        copy.due_back = data.due_back;
        copy.updated_at = Utc::now();
        Ok(Some(copy.clone()))
    }

    async fn copies_delete(&self, id: &str) -> AppResult<()> {
        self.copies.write().await.retain(|c| c.id.to_string() != id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
