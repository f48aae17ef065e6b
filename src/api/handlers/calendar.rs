//! Handler for the month grid endpoint.

use axum::{
    Json,
    extract::{Query, rejection::QueryRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::calendar::{CalendarQuery, CalendarResponse};
use crate::domain::calendar::compute_grid;
use crate::error::AppError;

/// Returns one month as a grid of Sunday-first weeks.
///
/// # Endpoint
///
/// `GET /api/calendar?month=3&year=2025`
///
/// `month` is zero-based.
///
/// # Response
///
/// ```json
/// {
///   "month": 3,
///   "year": 2025,
///   "title": "April 2025",
///   "days_in_month": 30,
///   "first_weekday": 2,
///   "weeks": [[null, null, 1, 2, 3, 4, 5], ...]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a missing or out-of-range month or year.
pub async fn calendar_handler(
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Result<Json<CalendarResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        AppError::bad_request(
            "Invalid calendar query",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    query.validate()?;

    let grid = compute_grid(query.month, query.year)?;
    Ok(Json(grid.into()))
}
