use std::sync::Arc;
use crate::domain::ports::{BookingRepository, CinemaRepository, MovieRepository, ShowtimeRepository};
use crate::domain::services::booking_service::SeatInventoryManager;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub movie_repo: Arc<dyn MovieRepository>,
    pub cinema_repo: Arc<dyn CinemaRepository>,
    pub showtime_repo: Arc<dyn ShowtimeRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub seat_inventory: Arc<SeatInventoryManager>,
}
