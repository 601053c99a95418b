//! Handlers for the statistics endpoints.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::{LinkStatsResponse, OverviewResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the global rollup.
///
/// # Endpoint
///
/// `GET /stats`
///
/// # Response
///
/// ```json
/// {
///   "totalLinks": 3,
///   "totalClicks": 12,
///   "top": [ ...up to ten links by click count... ],
///   "series": [ {"day": "2026-08-22", "clicks": 4}, ... ]
/// }
/// ```
///
/// The series covers the trailing 30 days including today, zero-filled.
pub async fn overview_handler(
    State(state): State<AppState>,
) -> Result<Json<OverviewResponse>, AppError> {
    let overview = state.stats_service.overview().await?;

    Ok(Json(overview.into()))
}

/// Returns the rollup for one link.
///
/// # Endpoint
///
/// `GET /stats/{id}`
///
/// The series runs from the link's first click through today (empty if the
/// link was never clicked); `recent` holds up to fifty click events newest
/// first.
///
/// # Errors
///
/// Returns 404 if no link has this id.
pub async fn link_stats_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let stats = state.stats_service.link_stats(id).await?;

    Ok(Json(stats.into()))
}
