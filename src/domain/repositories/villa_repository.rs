//! Repository trait for the villa catalog.

use crate::domain::entities::Villa;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to the villas guests can book.
///
/// The catalog is queried by selection only; there is no create, update or
/// delete.
///
/// # Implementations
///
/// - [`crate::infrastructure::catalog::StaticVillaRepository`] - Built-in catalog
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VillaRepository: Send + Sync {
    /// Lists every villa in display order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the catalog cannot be read.
    async fn list(&self) -> Result<Vec<Villa>, AppError>;

    /// Finds a villa by its catalog ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the catalog cannot be read.
    async fn find_by_id(&self, id: u32) -> Result<Option<Villa>, AppError>;
}
