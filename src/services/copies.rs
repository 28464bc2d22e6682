//! Book copy management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{BookCopy, BookTitle, CopyDraft, CopyForm},
    repository::CatalogStore,
    validation::FieldError,
};

pub const COPY_NOT_FOUND: &str = "Book copy not found";

fn copy_not_found() -> AppError {
    AppError::NotFound(COPY_NOT_FOUND.to_string())
}

/// Outcome of a create or update form submission
#[derive(Debug)]
pub enum Submission {
    /// The copy was written
    Saved(BookCopy),
    /// At least one field rule failed; nothing was written
    Rejected(RejectedForm),
}

/// Everything needed to show a rejected form again
#[derive(Debug)]
pub struct RejectedForm {
    pub draft: CopyDraft,
    pub errors: Vec<FieldError>,
    pub books: Vec<BookTitle>,
}

#[derive(Clone)]
pub struct CopyService {
    store: Arc<dyn CatalogStore>,
}

impl CopyService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All copies with their books
    pub async fn list(&self) -> AppResult<Vec<BookCopy>> {
        self.store.copies_list().await
    }

    /// Get a copy, failing with NotFound when absent
    pub async fn get(&self, id: &str) -> AppResult<BookCopy> {
        self.store.copies_find(id).await?.ok_or_else(copy_not_found)
    }

    pub async fn find(&self, id: &str) -> AppResult<Option<BookCopy>> {
        self.store.copies_find(id).await
    }

    /// Books offered in the form's selection list
    pub async fn book_titles(&self) -> AppResult<Vec<BookTitle>> {
        self.store.books_list_titles().await
    }

    /// Load a copy and the book list for the update form.
    ///
    /// Both reads run concurrently; either failure fails the whole call.
    pub async fn edit(&self, id: &str) -> AppResult<(BookCopy, Vec<BookTitle>)> {
        let (copy, books) = tokio::try_join!(
            self.store.copies_find(id),
            self.store.books_list_titles()
        )?;
        let copy = copy.ok_or_else(copy_not_found)?;
        Ok((copy, books))
    }

    /// Validate and create a copy
    pub async fn create(&self, form: CopyForm) -> AppResult<Submission> {
        let form = form.sanitized();
        let data = match form.check() {
            Ok(data) => data,
            Err(errors) => return self.reject(CopyDraft::from_form(None, &form), errors).await,
        };

        let copy = self.store.copies_create(&data).await?;
        tracing::info!(copy_id = %copy.id, book_id = %copy.book_id, "Created book copy");
        Ok(Submission::Saved(copy))
    }

    /// Validate and replace the fields of an existing copy, keeping its id
    pub async fn update(&self, id: &str, form: CopyForm) -> AppResult<Submission> {
        let form = form.sanitized();
        let data = match form.check() {
            Ok(data) => data,
            Err(errors) => {
                return self
                    .reject(CopyDraft::from_form(Some(id), &form), errors)
                    .await
            }
        };

        let copy = self
            .store
            .copies_update(id, &data)
            .await?
            .ok_or_else(copy_not_found)?;
        tracing::info!(copy_id = %copy.id, "Updated book copy");
        Ok(Submission::Saved(copy))
    }

    /// Delete a copy; a missing copy is a no-op
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.copies_delete(id).await?;
        tracing::info!(copy_id = %id, "Deleted book copy");
        Ok(())
    }

    async fn reject(&self, draft: CopyDraft, errors: Vec<FieldError>) -> AppResult<Submission> {
        tracing::debug!(?errors, "Copy form rejected");
        let books = self.store.books_list_titles().await?;
        Ok(Submission::Rejected(RejectedForm {
            draft,
            errors,
            books,
        }))
    }
}
