use crate::domain::models::{
    movie::Movie, cinema::{Cinema, Screen}, booking::Booking,
    showtime::{Showtime, ShowtimeDetails, ShowtimeFilter, AvailableTime},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn create(&self, movie: &Movie) -> Result<Movie, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, AppError>;
    async fn update(&self, movie: &Movie) -> Result<Movie, AppError>;
}

#[async_trait]
pub trait CinemaRepository: Send + Sync {
    async fn create(&self, cinema: &Cinema) -> Result<Cinema, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Cinema>, AppError>;
    async fn create_screen(&self, screen: &Screen) -> Result<Screen, AppError>;
    async fn find_screen(&self, id: &str) -> Result<Option<Screen>, AppError>;
    async fn list_screens(&self, cinema_id: &str) -> Result<Vec<Screen>, AppError>;
}

#[async_trait]
pub trait ShowtimeRepository: Send + Sync {
    async fn create(&self, showtime: &Showtime) -> Result<Showtime, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Showtime>, AppError>;
    async fn list_with_details(&self, filter: &ShowtimeFilter) -> Result<Vec<ShowtimeDetails>, AppError>;
    /// Distinct dates on or after `from` with at least one showtime that still has seats.
    async fn list_available_dates(&self, movie_id: Option<&str>, cinema_id: Option<&str>, from: NaiveDate) -> Result<Vec<NaiveDate>, AppError>;
    async fn list_available_times(&self, movie_id: &str, cinema_id: &str, date: NaiveDate) -> Result<Vec<AvailableTime>, AppError>;
}

/// Booking persistence. Both writes update the showtime's seat fields in the
/// same transaction as the booking row.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_with_seats(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// `Ok(None)` when no booking has this id. An already cancelled booking is returned untouched.
    async fn cancel(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
}

/// Source of booking codes.
pub trait BookingCodeGenerator: Send + Sync {
    fn next_code(&self) -> String;
}
