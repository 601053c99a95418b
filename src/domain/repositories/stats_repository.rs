//! Repository trait for click recording and statistics.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Click total for a single day.
///
/// Serializes as `{"day": "YYYY-MM-DD", "clicks": n}`, the shape the stats
/// endpoints put on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DayCount {
    pub day: NaiveDate,
    pub clicks: i64,
}

/// Expands sparse per-day totals into a gapless series over `[from, to]`.
///
/// Days with no clicks get an explicit zero entry. `rows` must hold at most
/// one entry per day; entries outside the range are ignored. An inverted
/// range yields an empty series.
pub fn fill_daily_series(rows: &[DayCount], from: NaiveDate, to: NaiveDate) -> Vec<DayCount> {
    let mut series = Vec::new();
    let mut day = from;
    while day <= to {
        let clicks = rows
            .iter()
            .find(|r| r.day == day)
            .map(|r| r.clicks)
            .unwrap_or(0);
        series.push(DayCount { day, clicks });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    series
}

/// Repository interface for click tracking and statistics.
///
/// Handles recording click events atomically with the owning link's
/// denormalized counter, and the aggregate queries behind the stats and
/// export endpoints.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteStatsRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_stats.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Records a click and increments the owning link's `clicks_count`.
    ///
    /// Both writes happen in one transaction; either both land or neither
    /// does, so the counter never diverges from the click rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the referenced link does not exist
    /// (nothing is written in that case).
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Counts all recorded clicks across all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_clicks(&self) -> Result<i64, AppError>;

    /// Daily click totals over `[from, to]`, zero-filled for quiet days.
    ///
    /// `link_id` scopes the series to one link; `None` aggregates across
    /// all links. Days are UTC.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn daily_series(
        &self,
        link_id: Option<i64>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DayCount>, AppError>;

    /// The UTC day of a link's earliest click, if it has any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn first_click_day(&self, link_id: i64) -> Result<Option<NaiveDate>, AppError>;

    /// The most recent clicks for a link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn recent_clicks(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, AppError>;

    /// All clicks ordered by timestamp ascending, for the tabular export.
    ///
    /// `link_id` optionally restricts the dump to one link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn export_all(&self, link_id: Option<i64>) -> Result<Vec<Click>, AppError>;
}
