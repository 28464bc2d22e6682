//! Book model (read-only from the copy handlers' point of view)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Book entry for selection lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookTitle {
    pub id: Uuid,
    pub title: String,
}
