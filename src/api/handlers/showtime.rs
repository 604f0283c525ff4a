use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{AvailableDatesQuery, AvailableTimesQuery, CreateShowtimeRequest, ShowtimeQuery},
    responses::{AvailableDatesResponse, AvailableTimesResponse},
};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::showtime::{NewShowtimeParams, Showtime, ShowtimeFilter};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_showtimes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ShowtimeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ShowtimeFilter {
        movie_id: query.movie_id,
        cinema_id: query.cinema_id,
        show_date: query.show_date,
    };
    let showtimes = state.showtime_repo.list_with_details(&filter).await?;
    Ok(Json(showtimes))
}

pub async fn create_showtime(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateShowtimeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.price < 0 {
        return Err(AppError::Validation("Price must not be negative".into()));
    }

    state.movie_repo.find_by_id(&payload.movie_id).await?
        .ok_or(AppError::NotFound("Movie not found".into()))?;
    state.cinema_repo.find_by_id(&payload.cinema_id).await?
        .ok_or(AppError::NotFound("Cinema not found".into()))?;
    let screen = state.cinema_repo.find_screen(&payload.screen_id).await?
        .ok_or(AppError::NotFound("Screen not found".into()))?;

    if screen.cinema_id != payload.cinema_id {
        return Err(AppError::Validation("Screen does not belong to this cinema".into()));
    }

    let capacity = payload.capacity.unwrap_or(screen.total_seats);
    if capacity <= 0 {
        return Err(AppError::Validation("Capacity must be positive".into()));
    }

    let showtime = Showtime::new(NewShowtimeParams {
        movie_id: payload.movie_id,
        cinema_id: payload.cinema_id,
        screen_id: payload.screen_id,
        show_date: payload.show_date,
        show_time: payload.show_time,
        price: payload.price,
        capacity,
    });
    let created = state.showtime_repo.create(&showtime).await?;

    info!(showtime_id = %created.id, capacity, "Showtime scheduled");
    Ok(Json(created))
}

pub async fn get_showtime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let showtime = state.showtime_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Showtime not found".into()))?;
    Ok(Json(showtime))
}

pub async fn get_available_dates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableDatesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let dates = state.seat_inventory
        .available_dates(query.movie_id.as_deref(), query.cinema_id.as_deref())
        .await?;
    Ok(Json(AvailableDatesResponse { dates }))
}

pub async fn get_available_times(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableTimesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let times = state.seat_inventory
        .available_times(&query.movie_id, &query.cinema_id, query.show_date)
        .await?;
    Ok(Json(AvailableTimesResponse { times }))
}
