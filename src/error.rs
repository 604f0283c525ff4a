use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use crate::domain::services::seat_inventory::SeatError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Seat(#[from] SeatError),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

/// Failures that stop the service before it starts accepting requests.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// SQLite extended result codes and PostgreSQL SQLSTATEs.
const UNIQUE_VIOLATION_CODES: [&str; 3] = ["2067", "1555", "23505"];
const WRITE_CONTENTION_CODES: [&str; 8] = ["5", "6", "261", "262", "517", "773", "40001", "40P01"];

fn db_error_code(e: &sqlx::Error) -> Option<String> {
    Some(e.as_database_error()?.code()?.to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(code) = db_error_code(e) {
                    if UNIQUE_VIOLATION_CODES.contains(&code.as_str()) {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Resource already exists (duplicate entry)" }))
                        ).into_response();
                    }
                    if WRITE_CONTENTION_CODES.contains(&code.as_str()) {
                        warn!("Write contention (code {}): {:?}", code, e);
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Showtime is being modified concurrently, please retry" }))
                        ).into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Seat(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
