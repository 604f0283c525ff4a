use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateCinemaRequest, CreateScreenRequest};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::cinema::{Cinema, Screen, DEFAULT_SCREEN_TYPE, DEFAULT_TOTAL_SEATS};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_cinema(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateCinemaRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Cinema name is required".into()));
    }

    let cinema = Cinema::new(payload.name.trim().to_string(), payload.address, payload.province);
    let created = state.cinema_repo.create(&cinema).await?;

    info!(cinema_id = %created.id, "Cinema created");
    Ok(Json(created))
}

pub async fn get_cinema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cinema = state.cinema_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Cinema not found".into()))?;
    Ok(Json(cinema))
}

pub async fn list_screens(
    State(state): State<Arc<AppState>>,
    Path(cinema_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.cinema_repo.find_by_id(&cinema_id).await?
        .ok_or(AppError::NotFound("Cinema not found".into()))?;

    let screens = state.cinema_repo.list_screens(&cinema_id).await?;
    Ok(Json(screens))
}

pub async fn create_screen(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(cinema_id): Path<String>,
    Json(payload): Json<CreateScreenRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.cinema_repo.find_by_id(&cinema_id).await?
        .ok_or(AppError::NotFound("Cinema not found".into()))?;

    let total_seats = payload.total_seats.unwrap_or(DEFAULT_TOTAL_SEATS);
    if total_seats <= 0 {
        return Err(AppError::Validation("Total seats must be positive".into()));
    }

    let screen_type = payload.screen_type
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SCREEN_TYPE.to_string());

    let screen = Screen::new(cinema_id, payload.screen_number, screen_type, total_seats);
    let created = state.cinema_repo.create_screen(&screen).await?;

    info!(screen_id = %created.id, cinema_id = %created.cinema_id, "Screen created");
    Ok(Json(created))
}
