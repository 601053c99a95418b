//! Read-only statistics rollups.

use std::sync::Arc;

use chrono::{Days, Utc};

use crate::domain::entities::{Click, Link};
use crate::domain::repositories::{DayCount, LinkRepository, StatsRepository};
use crate::error::AppError;

/// Days covered by the global series, counting today.
const OVERVIEW_WINDOW_DAYS: u64 = 30;

/// Entries in the global top list.
const TOP_LINKS_LIMIT: i64 = 10;

/// Click rows in the per-link recent list.
const RECENT_CLICKS_LIMIT: i64 = 50;

/// Global rollup: totals, most-clicked links, and the trailing daily series.
#[derive(Debug, Clone)]
pub struct Overview {
    pub total_links: i64,
    pub total_clicks: i64,
    pub top: Vec<Link>,
    pub series: Vec<DayCount>,
}

/// Per-link rollup: the record itself, its whole daily history, and the
/// latest individual clicks.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub link: Link,
    pub series: Vec<DayCount>,
    pub recent: Vec<Click>,
}

/// Service computing the stats endpoints' payloads.
///
/// Pure reads. Totals come from the maintained `clicks_count` counters and
/// row counts, not from rescanning the click log per request.
pub struct StatsService<L: LinkRepository, S: StatsRepository> {
    link_repository: Arc<L>,
    stats_repository: Arc<S>,
}

impl<L: LinkRepository, S: StatsRepository> StatsService<L, S> {
    /// Creates a new statistics service.
    pub fn new(link_repository: Arc<L>, stats_repository: Arc<S>) -> Self {
        Self {
            link_repository,
            stats_repository,
        }
    }

    /// Computes the global rollup.
    ///
    /// The series covers the trailing 30 UTC days including today,
    /// zero-filled; the top list holds up to ten links ordered by click
    /// count, ties going to the lower id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn overview(&self) -> Result<Overview, AppError> {
        let total_links = self.link_repository.count().await?;
        let total_clicks = self.stats_repository.count_clicks().await?;
        let top = self.link_repository.top(TOP_LINKS_LIMIT).await?;

        let today = Utc::now().date_naive();
        let from = today - Days::new(OVERVIEW_WINDOW_DAYS - 1);
        let series = self.stats_repository.daily_series(None, from, today).await?;

        Ok(Overview {
            total_links,
            total_clicks,
            top,
            series,
        })
    }

    /// Computes the rollup for one link.
    ///
    /// The series runs from the link's first click through today; a link
    /// that was never clicked gets an empty series. Recent clicks come
    /// newest first, at most fifty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn link_stats(&self, id: i64) -> Result<LinkStats, AppError> {
        let link = self
            .link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        let series = match self.stats_repository.first_click_day(link.id).await? {
            Some(first) => {
                let today = Utc::now().date_naive();
                self.stats_repository
                    .daily_series(Some(link.id), first, today)
                    .await?
            }
            None => Vec::new(),
        };

        let recent = self
            .stats_repository
            .recent_clicks(link.id, RECENT_CLICKS_LIMIT)
            .await?;

        Ok(LinkStats {
            link,
            series,
            recent,
        })
    }

    /// Returns click rows oldest first, optionally for one link, for
    /// tabular export.
    pub async fn export_clicks(&self, link_id: Option<i64>) -> Result<Vec<Click>, AppError> {
        self.stats_repository.export_all(link_id).await
    }
}
