//! Handlers for the villa catalog.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::villa::VillaListResponse;
use crate::domain::entities::Villa;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every villa.
///
/// # Endpoint
///
/// `GET /api/villas`
///
/// # Response
///
/// ```json
/// {
///   "total": 3,
///   "items": [
///     {
///       "id": 1,
///       "name": "Villa Aurora",
///       "price": "€1,450 / night",
///       "maxGuests": 6,
///       "bedrooms": 3,
///       ...
///     }
///   ]
/// }
/// ```
pub async fn villa_list_handler(
    State(state): State<AppState>,
) -> Result<Json<VillaListResponse>, AppError> {
    let villas = state.villa_service.list().await?;
    Ok(Json(villas.into()))
}

/// Returns a single villa.
///
/// # Endpoint
///
/// `GET /api/villas/{id}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown ID.
pub async fn villa_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Villa>, AppError> {
    let villa = state.villa_service.get(id).await?;
    Ok(Json(villa))
}
