//! Handlers for tabular data exports.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use csv::WriterBuilder;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// Query string for `GET /export/clicks`.
#[derive(Debug, Deserialize)]
pub struct ExportClicksQuery {
    pub link_id: Option<i64>,
}

/// Dumps all links as CSV.
///
/// # Endpoint
///
/// `GET /export/links`
///
/// Columns `id,code,url,title,clicks_count,created_at,updated_at`, rows
/// ordered by id. Absent title/updated_at become empty fields.
pub async fn export_links_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let links = state.link_service.export_all().await?;

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record([
            "id",
            "code",
            "url",
            "title",
            "clicks_count",
            "created_at",
            "updated_at",
        ])
        .map_err(csv_error)?;

    for link in links {
        writer
            .write_record([
                link.id.to_string(),
                link.code,
                link.url,
                link.title.unwrap_or_default(),
                link.clicks_count.to_string(),
                link.created_at.to_rfc3339(),
                link.updated_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    csv_response(writer, "links.csv")
}

/// Dumps click rows as CSV, optionally for one link.
///
/// # Endpoint
///
/// `GET /export/clicks?link_id=<id>`
///
/// Columns `at,link_id,ip,ua,ref`, rows oldest first. Absent client
/// metadata becomes empty fields.
pub async fn export_clicks_handler(
    State(state): State<AppState>,
    Query(query): Query<ExportClicksQuery>,
) -> Result<Response, AppError> {
    let clicks = state.stats_service.export_clicks(query.link_id).await?;

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(["at", "link_id", "ip", "ua", "ref"])
        .map_err(csv_error)?;

    for click in clicks {
        writer
            .write_record([
                click.at.to_rfc3339(),
                click.link_id.to_string(),
                click.ip.unwrap_or_default(),
                click.ua.unwrap_or_default(),
                click.referrer.unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    csv_response(writer, "clicks.csv")
}

/// Finishes a CSV build into a download response.
fn csv_response(writer: csv::Writer<Vec<u8>>, filename: &str) -> Result<Response, AppError> {
    let data = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("csv export failed: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        data,
    )
        .into_response())
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::internal(format!("csv export failed: {e}"))
}
