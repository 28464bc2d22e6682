//! Book copy (physical, loanable instance of a book) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::{self, FieldError};

/// Path of the copy list view; also the landing page after a delete
pub const COPY_LIST_PATH: &str = "/catalog/copies";

/// Form fields in display order
const FORM_FIELDS: [&str; 4] = ["book", "imprint", "status", "due_back"];

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CopyStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl CopyStatus {
    pub const ALL: [CopyStatus; 4] = [
        CopyStatus::Available,
        CopyStatus::Maintenance,
        CopyStatus::Loaned,
        CopyStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyStatus::Available => "Available",
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::Loaned => "Loaned",
            CopyStatus::Reserved => "Reserved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl Default for CopyStatus {
    fn default() -> Self {
        CopyStatus::Maintenance
    }
}

impl std::fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Book copy with its book reference resolved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookCopy {
    pub id: Uuid,
    pub book_id: Uuid,
    /// Title of the referenced book (JOIN on books)
    pub book_title: String,
    /// Stored escaped
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookCopy {
    /// Canonical detail page path
    pub fn url(&self) -> String {
        copy_url(&self.id.to_string())
    }

    /// Due date for display, e.g. "Oct 18, 2026"; empty when not set
    pub fn due_back_formatted(&self) -> String {
        self.due_back
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

pub fn copy_url(id: &str) -> String {
    format!("{}/{}", COPY_LIST_PATH, id)
}

/// Copy fields as submitted by the create/update form.
///
/// Missing fields deserialize as empty strings. Call [`CopyForm::sanitized`]
/// before [`CopyForm::check`].
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CopyForm {
    /// Book ID
    #[serde(default)]
    #[validate(length(min = 1, message = "Book is a required field."))]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint is a required field."))]
    pub imprint: String,
    /// One of Available, Maintenance, Loaned, Reserved; Maintenance when empty
    #[serde(default)]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
    /// ISO-8601 date
    #[serde(default)]
    #[validate(custom(function = "validate_due_back"))]
    pub due_back: String,
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || CopyStatus::parse(value).is_some() {
        return Ok(());
    }
    Err(validation::error_with_message("status", "Invalid status"))
}

fn validate_due_back(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || validation::parse_iso8601_date(value).is_some() {
        return Ok(());
    }
    Err(validation::error_with_message("due_back", "Invalid date"))
}

/// Validated copy fields ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyData {
    pub book: String,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<NaiveDate>,
}

impl CopyForm {
    /// Trim and escape text fields
    pub fn sanitized(self) -> Self {
        Self {
            book: validation::trim_escape(&self.book),
            imprint: validation::trim_escape(&self.imprint),
            status: validation::escape(&self.status),
            due_back: self.due_back.trim().to_string(),
        }
    }

    /// Run every field rule; all failures are reported, not just the first.
    pub fn check(&self) -> Result<CopyData, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            return Err(validation::collect_field_errors(&errors, &FORM_FIELDS));
        }

        Ok(CopyData {
            book: self.book.clone(),
            imprint: self.imprint.clone(),
            status: CopyStatus::parse(&self.status).unwrap_or_default(),
            due_back: validation::parse_iso8601_date(&self.due_back),
        })
    }
}

/// Values shown in the create/update form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyDraft {
    /// Set when editing an existing copy
    pub id: Option<String>,
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

impl CopyDraft {
    pub fn from_form(id: Option<&str>, form: &CopyForm) -> Self {
        Self {
            id: id.map(str::to_string),
            book: form.book.clone(),
            imprint: form.imprint.clone(),
            status: form.status.clone(),
            due_back: form.due_back.clone(),
        }
    }
}

impl From<&BookCopy> for CopyDraft {
    fn from(copy: &BookCopy) -> Self {
        Self {
            id: Some(copy.id.to_string()),
            book: copy.book_id.to_string(),
            imprint: copy.imprint.clone(),
            status: copy.status.clone(),
            due_back: copy
                .due_back
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Delete confirmation form body
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteCopyForm {
    /// ID of the copy to remove
    #[serde(default)]
    pub id: String,
}
