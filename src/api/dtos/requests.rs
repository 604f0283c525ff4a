use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use crate::domain::models::movie::{NewMovieParams, MOVIE_STATUSES};
use crate::domain::services::booking_service::BookingRequest;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub poster: Option<String>,
    pub rating: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i32>,
    pub status: Option<String>,
    pub trailer: Option<String>,
    pub description: Option<String>,
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    pub release_date: Option<NaiveDate>,
}

impl CreateMovieRequest {
    pub fn into_params(self) -> Result<NewMovieParams, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Movie title is required".into()));
        }

        let status = self.status.unwrap_or_else(|| "coming".to_string());
        if !MOVIE_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation(format!("Unknown movie status: {}", status)));
        }

        if self.duration.is_some_and(|d| d <= 0) {
            return Err(AppError::Validation("Duration must be positive".into()));
        }

        Ok(NewMovieParams {
            title: self.title.trim().to_string(),
            poster: self.poster,
            rating: self.rating,
            genre: self.genre,
            duration: self.duration,
            status,
            trailer: self.trailer,
            description: self.description,
            director: self.director,
            cast: self.cast,
            release_date: self.release_date,
        })
    }
}

#[derive(Deserialize)]
pub struct CreateCinemaRequest {
    pub name: String,
    pub address: Option<String>,
    pub province: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateScreenRequest {
    pub screen_number: i32,
    pub screen_type: Option<String>,
    pub total_seats: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateShowtimeRequest {
    pub movie_id: String,
    pub cinema_id: String,
    pub screen_id: String,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub price: i64,
    /// Defaults to the screen's total seats.
    pub capacity: Option<i32>,
}

#[derive(Deserialize, Default)]
pub struct ShowtimeQuery {
    pub movie_id: Option<String>,
    pub cinema_id: Option<String>,
    pub show_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct AvailableDatesQuery {
    pub movie_id: Option<String>,
    pub cinema_id: Option<String>,
}

#[derive(Deserialize)]
pub struct AvailableTimesQuery {
    pub movie_id: String,
    pub cinema_id: String,
    pub show_date: NaiveDate,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub showtime_id: String,
    pub seats: Vec<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub total_amount: i64,
    pub payment_method: Option<String>,
}

impl From<CreateBookingRequest> for BookingRequest {
    fn from(req: CreateBookingRequest) -> Self {
        Self {
            showtime_id: req.showtime_id,
            seats: req.seats,
            customer_name: req.customer_name,
            customer_phone: req.customer_phone,
            customer_email: req.customer_email,
            total_amount: req.total_amount,
            payment_method: req.payment_method,
        }
    }
}
