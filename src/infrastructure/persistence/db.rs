//! SQLite pool construction and idempotent schema creation.

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Opens (and creates, if missing) the SQLite database behind `url`.
///
/// For file-backed databases the parent directory is created first. WAL
/// journaling keeps concurrent readers off the writer's back; foreign keys
/// must be on for click rows to cascade with their link.
pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        if !path.starts_with(":memory:") {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("creating database directory {parent:?}"))?;
                }
            }
        }
    }

    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("invalid database url: {url}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .context("connecting to database")?;

    Ok(pool)
}

/// Creates the tables and indexes if they do not exist yet.
///
/// Safe to run on every startup.
pub async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            url TEXT NOT NULL,
            title TEXT,
            clicks_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT
        )",
        "CREATE TABLE IF NOT EXISTS clicks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            link_id INTEGER NOT NULL REFERENCES links(id) ON DELETE CASCADE,
            at TEXT NOT NULL,
            ip TEXT,
            ua TEXT,
            ref TEXT
        )",
        "CREATE INDEX IF NOT EXISTS idx_clicks_link ON clicks(link_id)",
        "CREATE INDEX IF NOT EXISTS idx_clicks_at ON clicks(at)",
    ];

    for sql in statements {
        sqlx::query(sql)
            .execute(pool)
            .await
            .context("initializing schema")?;
    }

    tracing::debug!("database schema ready");
    Ok(())
}
