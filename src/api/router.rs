use axum::{
    body::Body,
    extract::Request,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, movie, cinema, showtime, booking};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Catalog
        .route("/api/v1/movies", post(movie::create_movie))
        .route("/api/v1/movies/{id}", get(movie::get_movie).put(movie::update_movie))
        .route("/api/v1/cinemas", post(cinema::create_cinema))
        .route("/api/v1/cinemas/{id}", get(cinema::get_cinema))
        .route("/api/v1/cinemas/{id}/screens", get(cinema::list_screens).post(cinema::create_screen))

        // Showtimes
        .route("/api/v1/showtimes", get(showtime::list_showtimes).post(showtime::create_showtime))
        .route("/api/v1/showtimes/dates/available", get(showtime::get_available_dates))
        .route("/api/v1/showtimes/times/available", get(showtime::get_available_times))
        .route("/api/v1/showtimes/{id}", get(showtime::get_showtime))

        // Bookings
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/bookings/code/{code}", get(booking::get_booking_by_code))
        .route("/api/v1/bookings/{id}", get(booking::get_booking))
        .route("/api/v1/bookings/{id}/details", get(booking::get_booking_details))
        .route("/api/v1/bookings/{id}/cancel", patch(booking::cancel_booking))
        .route("/api/v1/me/bookings", get(booking::list_my_bookings))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
