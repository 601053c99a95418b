//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A shortened URL link with metadata.
///
/// `clicks_count` is a denormalized cache of the click rows owned by this
/// link, kept in sync by the storage layer. Field names match both the
/// storage columns and the wire format, so the entity serializes directly.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub title: Option<String>,
    pub clicks_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        code: String,
        url: String,
        title: Option<String>,
        clicks_count: i64,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            url,
            title,
            clicks_count,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new link.
///
/// The code has already been validated (or generated) by the time this
/// reaches storage; uniqueness is enforced at insert time.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub url: String,
    pub title: Option<String>,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged.
/// `title: Some(None)` clears the title; `Some(Some(t))` sets it.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub url: Option<String>,
    pub title: Option<Option<String>>,
    pub code: Option<String>,
}

impl LinkPatch {
    /// Returns true when the patch touches nothing.
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.title.is_none() && self.code.is_none()
    }
}
