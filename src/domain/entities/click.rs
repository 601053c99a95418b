//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A click event recorded when a shortened link is accessed.
///
/// Captures per-visit metadata for analytics. All client fields are
/// free-form and optional; absent values are stored as absent, never
/// fabricated.
#[derive(Debug, Clone, FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub at: DateTime<Utc>,
    pub ip: Option<String>,
    pub ua: Option<String>,
    #[sqlx(rename = "ref")]
    pub referrer: Option<String>,
}

/// Input data for recording a new click event.
///
/// `link_id` must reference an existing link; the timestamp is assigned at
/// recording time by the storage layer.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub ip: Option<String>,
    pub ua: Option<String>,
    pub referrer: Option<String>,
}

impl NewClick {
    /// A click with no client metadata at all, as seen from transports
    /// that expose neither peer address nor headers.
    pub fn bare(link_id: i64) -> Self {
        Self {
            link_id,
            ip: None,
            ua: None,
            referrer: None,
        }
    }
}
