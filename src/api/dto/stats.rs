//! DTOs for the statistics endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::{LinkStats, Overview};
use crate::domain::entities::{Click, Link};
use crate::domain::repositories::DayCount;

/// Response body for `GET /stats`.
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    #[serde(rename = "totalLinks")]
    pub total_links: i64,
    #[serde(rename = "totalClicks")]
    pub total_clicks: i64,
    pub top: Vec<Link>,
    pub series: Vec<DayCount>,
}

impl From<Overview> for OverviewResponse {
    fn from(overview: Overview) -> Self {
        Self {
            total_links: overview.total_links,
            total_clicks: overview.total_clicks,
            top: overview.top,
            series: overview.series,
        }
    }
}

/// One click event in a per-link rollup.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub at: DateTime<Utc>,
    pub ip: Option<String>,
    pub ua: Option<String>,
    #[serde(rename = "ref")]
    pub referrer: Option<String>,
}

impl From<Click> for ClickInfo {
    fn from(click: Click) -> Self {
        Self {
            at: click.at,
            ip: click.ip,
            ua: click.ua,
            referrer: click.referrer,
        }
    }
}

/// Response body for `GET /stats/{id}`.
#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    pub link: Link,
    pub series: Vec<DayCount>,
    pub recent: Vec<ClickInfo>,
}

impl From<LinkStats> for LinkStatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            link: stats.link,
            series: stats.series,
            recent: stats.recent.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
