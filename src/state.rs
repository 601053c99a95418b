//! Shared application state injected into all handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::infrastructure::persistence::{SqliteLinkRepository, SqliteStatsRepository};
use crate::security::MutationGuard;

/// Handler-visible services plus the mutation capability guard.
///
/// Cheap to clone; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<SqliteLinkRepository>>,
    pub redirect_service: Arc<RedirectService<SqliteLinkRepository, SqliteStatsRepository>>,
    pub stats_service: Arc<StatsService<SqliteLinkRepository, SqliteStatsRepository>>,
    pub mutation_guard: Arc<dyn MutationGuard>,
}

impl AppState {
    /// Wires the services over one shared pool.
    pub fn new(pool: SqlitePool, mutation_guard: Arc<dyn MutationGuard>) -> Self {
        let pool = Arc::new(pool);
        let link_repository = Arc::new(SqliteLinkRepository::new(pool.clone()));
        let stats_repository = Arc::new(SqliteStatsRepository::new(pool));

        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone())),
            redirect_service: Arc::new(RedirectService::new(
                link_repository.clone(),
                stats_repository.clone(),
            )),
            stats_service: Arc::new(StatsService::new(link_repository, stats_repository)),
            mutation_guard,
        }
    }
}
