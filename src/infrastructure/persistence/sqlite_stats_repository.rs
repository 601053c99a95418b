//! SQLite implementation of the stats repository.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::{fill_daily_series, DayCount, StatsRepository};
use crate::error::AppError;

const CLICK_COLUMNS: &str = "id, link_id, at, ip, ua, ref";

/// SQLite repository for click recording and aggregate queries.
pub struct SqliteStatsRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for SqliteStatsRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tx = self.pool.begin().await?;

        // The counter bump doubles as the existence check: zero rows
        // affected means the link is gone and nothing must be written.
        let bumped = sqlx::query("UPDATE links SET clicks_count = clicks_count + 1 WHERE id = ?")
            .bind(new_click.link_id)
            .execute(&mut *tx)
            .await?;
        if bumped.rows_affected() == 0 {
            return Err(AppError::not_found("Link not found"));
        }

        let at = Utc::now();
        let inserted =
            sqlx::query("INSERT INTO clicks (link_id, at, ip, ua, ref) VALUES (?, ?, ?, ?, ?)")
                .bind(new_click.link_id)
                .bind(at)
                .bind(&new_click.ip)
                .bind(&new_click.ua)
                .bind(&new_click.referrer)
                .execute(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Click {
            id: inserted.last_insert_rowid(),
            link_id: new_click.link_id,
            at,
            ip: new_click.ip,
            ua: new_click.ua,
            referrer: new_click.referrer,
        })
    }

    async fn count_clicks(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn daily_series(
        &self,
        link_id: Option<i64>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DayCount>, AppError> {
        let rows = match link_id {
            Some(id) => {
                sqlx::query_as::<_, DayCount>(
                    "SELECT strftime('%Y-%m-%d', at) AS day, COUNT(*) AS clicks
                     FROM clicks
                     WHERE link_id = ? AND strftime('%Y-%m-%d', at) BETWEEN ? AND ?
                     GROUP BY day",
                )
                .bind(id)
                .bind(from)
                .bind(to)
                .fetch_all(self.pool.as_ref())
                .await?
            }
            None => {
                sqlx::query_as::<_, DayCount>(
                    "SELECT strftime('%Y-%m-%d', at) AS day, COUNT(*) AS clicks
                     FROM clicks
                     WHERE strftime('%Y-%m-%d', at) BETWEEN ? AND ?
                     GROUP BY day",
                )
                .bind(from)
                .bind(to)
                .fetch_all(self.pool.as_ref())
                .await?
            }
        };

        Ok(fill_daily_series(&rows, from, to))
    }

    async fn first_click_day(&self, link_id: i64) -> Result<Option<NaiveDate>, AppError> {
        let day: Option<NaiveDate> =
            sqlx::query_scalar("SELECT strftime('%Y-%m-%d', MIN(at)) FROM clicks WHERE link_id = ?")
                .bind(link_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(day)
    }

    async fn recent_clicks(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, AppError> {
        let clicks = sqlx::query_as::<_, Click>(&format!(
            "SELECT {CLICK_COLUMNS} FROM clicks WHERE link_id = ? ORDER BY at DESC, id DESC LIMIT ?"
        ))
        .bind(link_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(clicks)
    }

    async fn export_all(&self, link_id: Option<i64>) -> Result<Vec<Click>, AppError> {
        let clicks = match link_id {
            Some(id) => {
                sqlx::query_as::<_, Click>(&format!(
                    "SELECT {CLICK_COLUMNS} FROM clicks WHERE link_id = ? ORDER BY at ASC, id ASC"
                ))
                .bind(id)
                .fetch_all(self.pool.as_ref())
                .await?
            }
            None => {
                sqlx::query_as::<_, Click>(&format!(
                    "SELECT {CLICK_COLUMNS} FROM clicks ORDER BY at ASC, id ASC"
                ))
                .fetch_all(self.pool.as_ref())
                .await?
            }
        };

        Ok(clicks)
    }
}
