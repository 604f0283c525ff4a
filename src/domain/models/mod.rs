pub mod auth;
pub mod booking;
pub mod cinema;
pub mod movie;
pub mod showtime;
