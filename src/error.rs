//! Application error taxonomy and HTTP mapping.
//!
//! Every fallible path in the crate funnels into [`AppError`]. Handlers
//! return `Result<_, AppError>` and the [`IntoResponse`] impl renders the
//! wire shape the dashboard client expects: field-level maps for
//! validation-class failures, a plain `{"error": …}` envelope otherwise.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation. Carries a `{field: message}` object.
    #[error("validation failed")]
    Validation { errors: Value },

    /// A uniqueness rule was violated (alias already taken). Same wire
    /// envelope as `Validation`, distinct kind so callers can tell them
    /// apart.
    #[error("conflict")]
    Conflict { errors: Value },

    /// The request is well-formed JSON but semantically empty or unusable.
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },

    /// Mutation attempted without a valid anti-forgery token.
    #[error("{message}")]
    Forbidden { message: String },

    /// Storage failure, generator exhaustion, or other server-side fault.
    /// The wire only ever sees a generic message; `message` goes to the log.
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    /// Single-field validation failure.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            errors: json!({ field: message.into() }),
        }
    }

    /// Multi-field validation failure from a collected error map.
    pub fn validation_map(errors: Map<String, Value>) -> Self {
        Self::Validation {
            errors: Value::Object(errors),
        }
    }

    /// Conflict reported against a single field.
    pub fn conflict(field: &str, message: impl Into<String>) -> Self {
        Self::Conflict {
            errors: json!({ field: message.into() }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation { errors } | AppError::Conflict { errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            AppError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            AppError::NotFound { message } => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            AppError::Forbidden { message } => {
                (StatusCode::FORBIDDEN, Json(json!({ "error": message }))).into_response()
            }
            AppError::Internal { message } => {
                tracing::error!(detail = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Translates storage-level failures into the application taxonomy.
///
/// The only UNIQUE constraint in the schema besides primary keys is
/// `links.code`, so a unique violation always means the alias is taken.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict("code", "Alias already in use");
        }
    }

    AppError::internal(format!("database error: {e}"))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}
