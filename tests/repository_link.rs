mod common;

use chrono::Utc;
use shorty::AppError;
use shorty::domain::entities::{LinkPatch, NewLink};
use shorty::domain::repositories::LinkRepository;
use shorty::infrastructure::persistence::SqliteLinkRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        url: url.to_string(),
        title: None,
    }
}

#[sqlx::test]
async fn test_schema_bootstrap_is_rerunnable(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));
    let created = repo
        .create(new_link("boot01", "https://example.com"))
        .await
        .unwrap();

    // Startup against an existing database leaves its data alone.
    common::setup_schema(&pool).await;

    let found = repo.find_by_code("boot01").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
}

#[sqlx::test]
async fn test_create_link(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    let link = repo
        .create(NewLink {
            code: "make01".to_string(),
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
        })
        .await
        .unwrap();

    assert!(link.id > 0);
    assert_eq!(link.code, "make01");
    assert_eq!(link.url, "https://example.com");
    assert_eq!(link.title.as_deref(), Some("Example"));
    assert_eq!(link.clicks_count, 0);
    assert!(link.updated_at.is_none());

    // Round-trips through storage.
    let fetched = repo.find_by_id(link.id).await.unwrap().unwrap();
    assert_eq!(fetched.code, "make01");
    assert_eq!(fetched.created_at, link.created_at);
}

#[sqlx::test]
async fn test_create_duplicate_code_is_conflict(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    repo.create(new_link("dup001", "https://example.com/a"))
        .await
        .unwrap();
    let result = repo.create(new_link("dup001", "https://example.com/b")).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_find_by_code(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    common::create_test_link(&pool, "seek01", "https://example.com").await;

    let found = repo.find_by_code("seek01").await.unwrap();
    assert_eq!(found.unwrap().code, "seek01");

    let missing = repo.find_by_code("nothere").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_code_exists(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    common::create_test_link(&pool, "exist1", "https://example.com").await;

    assert!(repo.code_exists("exist1").await.unwrap());
    assert!(!repo.code_exists("absent").await.unwrap());
}

#[sqlx::test]
async fn test_list_newest_first(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    common::create_test_link(&pool, "one001", "https://example.com/1").await;
    common::create_test_link(&pool, "two002", "https://example.com/2").await;
    common::create_test_link(&pool, "three3", "https://example.com/3").await;

    let links = repo.list(None).await.unwrap();

    assert_eq!(links.len(), 3);
    assert_eq!(links[0].code, "three3");
    assert_eq!(links[2].code, "one001");
}

#[sqlx::test]
async fn test_list_filter_matches_all_columns(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    common::create_titled_link(&pool, "guide1", "https://doc.rust-lang.org", "The book").await;
    common::create_test_link(&pool, "news01", "https://example.com/news").await;

    // By code.
    let links = repo.list(Some("guide")).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].code, "guide1");

    // By URL.
    let links = repo.list(Some("rust-lang")).await.unwrap();
    assert_eq!(links.len(), 1);

    // By title.
    let links = repo.list(Some("book")).await.unwrap();
    assert_eq!(links.len(), 1);

    // No match.
    let links = repo.list(Some("zzz")).await.unwrap();
    assert!(links.is_empty());
}

#[sqlx::test]
async fn test_count(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    assert_eq!(repo.count().await.unwrap(), 0);

    common::create_test_link(&pool, "cnt001", "https://example.com/1").await;
    common::create_test_link(&pool, "cnt002", "https://example.com/2").await;

    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_top_ranks_by_counter(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    common::create_popular_link(&pool, "mid001", "https://example.com/m", 3).await;
    common::create_popular_link(&pool, "big001", "https://example.com/b", 5).await;
    common::create_popular_link(&pool, "tie001", "https://example.com/t", 3).await;
    common::create_test_link(&pool, "zero01", "https://example.com/z").await;

    let top = repo.top(3).await.unwrap();

    assert_eq!(top.len(), 3);
    assert_eq!(top[0].code, "big001");
    // Equal counters rank by insertion order.
    assert_eq!(top[1].code, "mid001");
    assert_eq!(top[2].code, "tie001");
}

#[sqlx::test]
async fn test_update_url_touches_updated_at(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    let id = common::create_titled_link(&pool, "upd001", "https://old.example.com", "Keep").await;

    let before = Utc::now();
    let link = repo
        .update(
            id,
            LinkPatch {
                url: Some("https://new.example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(link.url, "https://new.example.com");
    assert_eq!(link.title.as_deref(), Some("Keep"));
    assert!(link.updated_at.unwrap() >= before);
}

#[sqlx::test]
async fn test_update_clears_title(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    let id = common::create_titled_link(&pool, "upd002", "https://example.com", "Old").await;

    let link = repo
        .update(
            id,
            LinkPatch {
                title: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(link.title.is_none());
}

#[sqlx::test]
async fn test_update_code_to_taken_is_conflict(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    common::create_test_link(&pool, "first1", "https://example.com/a").await;
    let id = common::create_test_link(&pool, "second", "https://example.com/b").await;

    let result = repo
        .update(
            id,
            LinkPatch {
                code: Some("first1".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_update_keeping_own_code_is_allowed(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    let id = common::create_test_link(&pool, "mine01", "https://example.com").await;

    let link = repo
        .update(
            id,
            LinkPatch {
                code: Some("mine01".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(link.code, "mine01");
}

#[sqlx::test]
async fn test_update_unknown_id_is_not_found(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    let result = repo
        .update(
            9999,
            LinkPatch {
                url: Some("https://example.com".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
}

#[sqlx::test]
async fn test_delete(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    let id = common::create_test_link(&pool, "del001", "https://example.com").await;

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
}

#[sqlx::test]
async fn test_delete_cascades_to_clicks(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    let id = common::create_test_link(&pool, "del002", "https://example.com").await;
    let keep = common::create_test_link(&pool, "keep01", "https://example.com/keep").await;

    common::create_test_click(&pool, id, Utc::now()).await;
    common::create_test_click(&pool, id, Utc::now()).await;
    common::create_test_click(&pool, keep, Utc::now()).await;

    assert!(repo.delete(id).await.unwrap());

    // Only the surviving link's history remains.
    assert_eq!(common::count_clicks(&pool).await, 1);
}

#[sqlx::test]
async fn test_export_all_ordered_by_id(pool: SqlitePool) {
    common::setup_schema(&pool).await;
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    common::create_test_link(&pool, "exp001", "https://example.com/1").await;
    common::create_test_link(&pool, "exp002", "https://example.com/2").await;
    common::create_test_link(&pool, "exp003", "https://example.com/3").await;

    let links = repo.export_all().await.unwrap();

    assert_eq!(links.len(), 3);
    assert!(links.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(links[0].code, "exp001");
}
