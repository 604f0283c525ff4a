use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

/// One scheduled screening and its seat inventory.
///
/// `booked_seats` is the source of truth; `available_seats` is stored so that
/// listing queries can filter on it, but every write derives it from
/// `capacity - booked_seats.len()`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Showtime {
    pub id: String,
    pub movie_id: String,
    pub cinema_id: String,
    pub screen_id: String,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub price: i64,
    pub capacity: i32,
    pub available_seats: i32,
    pub booked_seats: Json<Vec<String>>,
    #[serde(skip_serializing)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

pub struct NewShowtimeParams {
    pub movie_id: String,
    pub cinema_id: String,
    pub screen_id: String,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub price: i64,
    pub capacity: i32,
}

impl Showtime {
    pub fn new(params: NewShowtimeParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            movie_id: params.movie_id,
            cinema_id: params.cinema_id,
            screen_id: params.screen_id,
            show_date: params.show_date,
            show_time: params.show_time,
            price: params.price,
            capacity: params.capacity,
            available_seats: params.capacity,
            booked_seats: Json(Vec::new()),
            version: 0,
            created_at: Utc::now(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.available_seats as i64 + self.booked_seats.len() as i64 == self.capacity as i64
    }
}

/// Showtime joined with the titles the booking widget displays.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ShowtimeDetails {
    pub id: String,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub price: i64,
    pub available_seats: i32,
    pub movie_title: String,
    pub cinema_name: String,
    pub screen_type: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailableTime {
    pub time: NaiveTime,
    pub showtime_id: String,
    pub available_seats: i32,
}

#[derive(Debug, Default, Clone)]
pub struct ShowtimeFilter {
    pub movie_id: Option<String>,
    pub cinema_id: Option<String>,
    pub show_date: Option<NaiveDate>,
}
