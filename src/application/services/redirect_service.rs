//! Redirect resolution and click recording service.

use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::error::AppError;

/// Client metadata captured on the redirect path.
///
/// Every field may be unavailable depending on transport context; absent
/// values stay absent.
#[derive(Debug, Clone, Default)]
pub struct ClickContext {
    pub ip: Option<String>,
    pub ua: Option<String>,
    pub referrer: Option<String>,
}

/// Service for the hot path: code in, target URL out, one click accounted.
///
/// The lookup and the recording are separate storage calls; the click insert
/// and counter bump inside `record_click` are the atomic part.
pub struct RedirectService<L: LinkRepository, S: StatsRepository> {
    link_repository: Arc<L>,
    stats_repository: Arc<S>,
}

impl<L: LinkRepository, S: StatsRepository> RedirectService<L, S> {
    /// Creates a new redirect service.
    pub fn new(link_repository: Arc<L>, stats_repository: Arc<S>) -> Self {
        Self {
            link_repository,
            stats_repository,
        }
    }

    /// Resolves a code and records the visit, returning the target URL.
    ///
    /// If the link vanishes between lookup and recording (a racing delete),
    /// the whole operation reports NotFound; a visit that cannot be
    /// accounted is not redirected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code (no click is
    /// recorded in that case).
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve_and_record(
        &self,
        code: &str,
        ctx: ClickContext,
    ) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        let click = NewClick {
            link_id: link.id,
            ip: ctx.ip,
            ua: ctx.ua,
            referrer: ctx.referrer,
        };

        self.stats_repository.record_click(click).await?;

        tracing::debug!(code, link_id = link.id, "recorded redirect");

        Ok(link.url)
    }
}
