use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::CreateBookingRequest, responses::BookingDetailsResponse};
use crate::api::extractors::{auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(user): MaybeAuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.seat_inventory
        .create_booking(payload.into(), user.as_ref())
        .await?;
    Ok(Json(booking))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.seat_inventory.get_booking(&id).await?))
}

pub async fn get_booking_by_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.seat_inventory.get_booking_by_code(&code).await?))
}

pub async fn get_booking_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.seat_inventory.get_booking(&id).await?;

    // Catalog rows are never deleted, so a dangling reference is a data fault
    let showtime = state.showtime_repo.find_by_id(&booking.showtime_id).await?
        .ok_or(AppError::InternalWithMsg("Booking references a missing showtime".into()))?;
    let movie = state.movie_repo.find_by_id(&showtime.movie_id).await?
        .ok_or(AppError::InternalWithMsg("Showtime references a missing movie".into()))?;
    let cinema = state.cinema_repo.find_by_id(&showtime.cinema_id).await?
        .ok_or(AppError::InternalWithMsg("Showtime references a missing cinema".into()))?;

    Ok(Json(BookingDetailsResponse::new(booking, movie, cinema, showtime)))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.seat_inventory.cancel_booking(&id).await?))
}

pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(&user.id).await?;
    Ok(Json(bookings))
}
