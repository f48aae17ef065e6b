//! DTOs for the villa catalog endpoints.

use serde::Serialize;

use crate::domain::entities::Villa;

/// Response for `GET /api/villas`.
#[derive(Debug, Serialize)]
pub struct VillaListResponse {
    pub total: usize,
    pub items: Vec<Villa>,
}

impl From<Vec<Villa>> for VillaListResponse {
    fn from(items: Vec<Villa>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
