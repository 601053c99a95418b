#![allow(dead_code)]

use chrono::{DateTime, Utc};
use shorty::infrastructure::persistence::db;
use shorty::security::HmacCsrfGuard;
use shorty::state::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Creates the tables in the fresh database `#[sqlx::test]` hands out.
///
/// Every test must call this first; the schema is normally created at
/// startup, not by a migration toolchain the test harness could run.
pub async fn setup_schema(pool: &SqlitePool) {
    db::init_schema(pool).await.unwrap();
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(
        pool,
        Arc::new(HmacCsrfGuard::new(b"test-signing-secret".to_vec())),
    )
}

pub async fn create_test_link(pool: &SqlitePool, code: &str, url: &str) -> i64 {
    sqlx::query("INSERT INTO links (code, url, clicks_count, created_at) VALUES (?, ?, 0, ?)")
        .bind(code)
        .bind(url)
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn create_titled_link(pool: &SqlitePool, code: &str, url: &str, title: &str) -> i64 {
    sqlx::query(
        "INSERT INTO links (code, url, title, clicks_count, created_at) VALUES (?, ?, ?, 0, ?)",
    )
    .bind(code)
    .bind(url)
    .bind(title)
    .bind(Utc::now())
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

/// Seeds a link whose denormalized counter is already at `clicks`.
///
/// No click rows are written; use this for ranking tests only.
pub async fn create_popular_link(pool: &SqlitePool, code: &str, url: &str, clicks: i64) -> i64 {
    sqlx::query("INSERT INTO links (code, url, clicks_count, created_at) VALUES (?, ?, ?, ?)")
        .bind(code)
        .bind(url)
        .bind(clicks)
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn create_test_click(pool: &SqlitePool, link_id: i64, at: DateTime<Utc>) {
    sqlx::query("INSERT INTO clicks (link_id, at) VALUES (?, ?)")
        .bind(link_id)
        .bind(at)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_click_with_meta(
    pool: &SqlitePool,
    link_id: i64,
    at: DateTime<Utc>,
    ip: &str,
    ua: &str,
    referrer: &str,
) {
    sqlx::query("INSERT INTO clicks (link_id, at, ip, ua, ref) VALUES (?, ?, ?, ?, ?)")
        .bind(link_id)
        .bind(at)
        .bind(ip)
        .bind(ua)
        .bind(referrer)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_links(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_clicks(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn clicks_count_of(pool: &SqlitePool, link_id: i64) -> i64 {
    sqlx::query_scalar("SELECT clicks_count FROM links WHERE id = ?")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
