pub mod booking;
pub mod cinema;
pub mod health;
pub mod movie;
pub mod showtime;
