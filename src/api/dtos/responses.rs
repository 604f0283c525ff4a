use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use crate::domain::models::{
    booking::Booking,
    cinema::Cinema,
    movie::Movie,
    showtime::{AvailableTime, Showtime},
};

#[derive(Serialize)]
pub struct AvailableDatesResponse {
    pub dates: Vec<NaiveDate>,
}

#[derive(Serialize)]
pub struct AvailableTimesResponse {
    pub times: Vec<AvailableTime>,
}

#[derive(Serialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub poster: Option<String>,
}

#[derive(Serialize)]
pub struct CinemaSummary {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Serialize)]
pub struct ShowtimeSummary {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub price: i64,
}

#[derive(Serialize)]
pub struct BookingDetailsResponse {
    pub booking: Booking,
    pub movie: MovieSummary,
    pub cinema: CinemaSummary,
    pub showtime: ShowtimeSummary,
}

impl BookingDetailsResponse {
    pub fn new(booking: Booking, movie: Movie, cinema: Cinema, showtime: Showtime) -> Self {
        Self {
            booking,
            movie: MovieSummary { id: movie.id, title: movie.title, poster: movie.poster },
            cinema: CinemaSummary { id: cinema.id, name: cinema.name, address: cinema.address },
            showtime: ShowtimeSummary { date: showtime.show_date, time: showtime.show_time, price: showtime.price },
        }
    }
}
