use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateMovieRequest;
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::movie::Movie;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateMovieRequest>,
) -> Result<impl IntoResponse, AppError> {
    let movie = Movie::new(payload.into_params()?);
    let created = state.movie_repo.create(&movie).await?;

    info!(movie_id = %created.id, admin_id = %admin.id, "Movie created");
    Ok(Json(created))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let movie = state.movie_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Movie not found".into()))?;
    Ok(Json(movie))
}

/// Full replace of the movie's editable fields.
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<CreateMovieRequest>,
) -> Result<impl IntoResponse, AppError> {
    let params = payload.into_params()?;

    let mut movie = state.movie_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Movie not found".into()))?;
    movie.apply(params);

    let updated = state.movie_repo.update(&movie).await?;

    info!(movie_id = %updated.id, admin_id = %admin.id, "Movie updated");
    Ok(Json(updated))
}
