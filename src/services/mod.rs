//! Business logic services

pub mod copies;

use std::sync::Arc;

use crate::{error::AppResult, repository::CatalogStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub copies: copies::CopyService,
    store: Arc<dyn CatalogStore>,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            copies: copies::CopyService::new(store.clone()),
            store,
        }
    }

    /// Check that the store answers
    pub async fn ready(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
