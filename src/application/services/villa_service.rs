//! Villa catalog lookups.

use std::sync::Arc;

use crate::domain::entities::Villa;
use crate::domain::repositories::VillaRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for reading the villa catalog.
pub struct VillaService<R: VillaRepository> {
    repository: Arc<R>,
}

impl<R: VillaRepository> VillaService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists every villa in display order.
    pub async fn list(&self) -> Result<Vec<Villa>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a villa by its catalog ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no villa has this ID.
    pub async fn get(&self, id: u32) -> Result<Villa, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Villa not found", json!({ "villa_id": id })))
    }
}
