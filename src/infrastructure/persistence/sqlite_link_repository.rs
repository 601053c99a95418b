//! SQLite implementation of the link repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, code, url, title, clicks_count, created_at, updated_at";

/// SQLite repository for link storage and retrieval.
///
/// Uses prepared statements with runtime binding; uniqueness of `code` is
/// delegated to the table's UNIQUE constraint so check-then-insert races
/// collapse into a single insert-time verdict.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO links (code, url, title, clicks_count, created_at) VALUES (?, ?, ?, 0, ?)",
        )
        .bind(&new_link.code)
        .bind(&new_link.url)
        .bind(&new_link.title)
        .bind(now)
        .execute(self.pool.as_ref())
        .await?;

        Ok(Link::new(
            result.last_insert_rowid(),
            new_link.code,
            new_link.url,
            new_link.title,
            0,
            now,
            None,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE code = ?"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM links WHERE code = ?)")
            .bind(code)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn list<'a>(&self, filter: Option<&'a str>) -> Result<Vec<Link>, AppError> {
        let links = match filter.filter(|q| !q.is_empty()) {
            Some(q) => {
                let pattern = format!("%{q}%");
                sqlx::query_as::<_, Link>(&format!(
                    "SELECT {LINK_COLUMNS} FROM links
                     WHERE code LIKE ? OR url LIKE ? OR COALESCE(title, '') LIKE ?
                     ORDER BY created_at DESC, id DESC"
                ))
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(self.pool.as_ref())
                .await?
            }
            None => {
                sqlx::query_as::<_, Link>(&format!(
                    "SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC, id DESC"
                ))
                .fetch_all(self.pool.as_ref())
                .await?
            }
        };

        Ok(links)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn top(&self, n: i64) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links ORDER BY clicks_count DESC, id ASC LIMIT ?"
        ))
        .bind(n)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;

        // Pre-check gives the friendly Conflict for the common case; the
        // UNIQUE constraint still decides racing renames at UPDATE time.
        if let Some(code) = &patch.code {
            let taken: Option<i64> =
                sqlx::query_scalar("SELECT id FROM links WHERE code = ? AND id <> ?")
                    .bind(code)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if taken.is_some() {
                return Err(AppError::conflict("code", "Alias already in use"));
            }
        }

        let mut sets = Vec::new();
        if patch.url.is_some() {
            sets.push("url = ?");
        }
        if patch.title.is_some() {
            sets.push("title = ?");
        }
        if patch.code.is_some() {
            sets.push("code = ?");
        }
        sets.push("updated_at = ?");

        let sql = format!("UPDATE links SET {} WHERE id = ?", sets.join(", "));
        let mut query = sqlx::query(&sql);
        if let Some(url) = &patch.url {
            query = query.bind(url);
        }
        if let Some(title) = &patch.title {
            query = query.bind(title);
        }
        if let Some(code) = &patch.code {
            query = query.bind(code);
        }
        let result = query
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Link not found"));
        }

        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = ?"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(link)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn export_all(&self) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links ORDER BY id ASC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }
}
