use std::collections::HashSet;
use thiserror::Error;
use crate::domain::models::showtime::Showtime;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeatError {
    #[error("At least one seat must be selected")]
    NoSeats,
    #[error("Seat codes must not be blank")]
    BlankSeat,
    #[error("Seat {0} is selected more than once")]
    DuplicateSeat(String),
    #[error("Seat {0} is already booked")]
    SeatAlreadyBooked(String),
    #[error("Not enough seats available: requested {requested}, available {available}")]
    InsufficientSeats { requested: usize, available: i32 },
}

/// Seat fields of a showtime after a reserve or release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatState {
    pub booked_seats: Vec<String>,
    pub available_seats: i32,
}

fn derived_available(capacity: i32, booked: usize) -> i32 {
    (capacity as i64 - booked as i64).max(0) as i32
}

/// Canonical seat codes: surrounding whitespace dropped, letters upper-cased.
pub fn normalize_seats(seats: &[String]) -> Vec<String> {
    seats.iter().map(|s| s.trim().to_uppercase()).collect()
}

/// Shape checks on a seat request that need no showtime state.
pub fn validate_request(seats: &[String]) -> Result<(), SeatError> {
    if seats.is_empty() {
        return Err(SeatError::NoSeats);
    }

    let mut seen = HashSet::with_capacity(seats.len());
    for seat in seats {
        if seat.trim().is_empty() {
            return Err(SeatError::BlankSeat);
        }
        if !seen.insert(seat.as_str()) {
            return Err(SeatError::DuplicateSeat(seat.clone()));
        }
    }
    Ok(())
}

/// Computes the seat state after booking `seats`, or the first reason it cannot be booked.
pub fn reserve(showtime: &Showtime, seats: &[String]) -> Result<SeatState, SeatError> {
    validate_request(seats)?;

    let booked: HashSet<&str> = showtime.booked_seats.iter().map(String::as_str).collect();
    if let Some(taken) = seats.iter().find(|s| booked.contains(s.as_str())) {
        return Err(SeatError::SeatAlreadyBooked(taken.clone()));
    }

    // Checked against the stored counter, independently of the set.
    if seats.len() as i64 > showtime.available_seats as i64 {
        return Err(SeatError::InsufficientSeats {
            requested: seats.len(),
            available: showtime.available_seats,
        });
    }

    let mut next = showtime.booked_seats.0.clone();
    next.extend(seats.iter().cloned());

    Ok(SeatState {
        available_seats: derived_available(showtime.capacity, next.len()),
        booked_seats: next,
    })
}

/// Removes `seats` from the showtime. Seats that are not booked are skipped.
pub fn release(showtime: &Showtime, seats: &[String]) -> SeatState {
    let releasing: HashSet<&str> = seats.iter().map(String::as_str).collect();
    let next: Vec<String> = showtime
        .booked_seats
        .iter()
        .filter(|s| !releasing.contains(s.as_str()))
        .cloned()
        .collect();

    SeatState {
        available_seats: derived_available(showtime.capacity, next.len()),
        booked_seats: next,
    }
}
