use std::sync::Arc;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{error, info, warn};
use crate::domain::{
    models::{
        auth::AuthenticatedUser,
        booking::{generate_booking_code, Booking, NewBookingParams, DEFAULT_PAYMENT_METHOD},
        showtime::AvailableTime,
    },
    ports::{BookingCodeGenerator, BookingRepository, ShowtimeRepository},
    services::seat_inventory,
};
use crate::error::AppError;

pub const BOOKING_CODE_ATTEMPTS: usize = 5;

pub struct UuidCodeGenerator;

impl BookingCodeGenerator for UuidCodeGenerator {
    fn next_code(&self) -> String {
        generate_booking_code()
    }
}

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub showtime_id: String,
    pub seats: Vec<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub total_amount: i64,
    pub payment_method: Option<String>,
}

struct Contact {
    name: String,
    phone: String,
    email: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Fills missing contact fields from the signed-in user's profile, then
/// requires all three.
fn resolve_contact(request: &BookingRequest, user: Option<&AuthenticatedUser>) -> Result<Contact, AppError> {
    let mut name = present(request.customer_name.clone());
    let mut email = present(request.customer_email.clone());
    let mut phone = present(request.customer_phone.clone());

    if let Some(user) = user {
        name = name.or_else(|| present(Some(user.full_name.clone())));
        email = email.or_else(|| present(Some(user.email.clone())));
        phone = phone.or_else(|| present(user.phone.clone()));
    }

    Ok(Contact {
        name: name.ok_or(AppError::Validation("Customer name is required".into()))?,
        email: email.ok_or(AppError::Validation("Customer email is required".into()))?,
        phone: phone.ok_or(AppError::Validation("Customer phone is required".into()))?,
    })
}

fn is_code_collision(err: &AppError) -> bool {
    match err {
        AppError::Database(e) => e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation()),
        _ => false,
    }
}

/// Owns the seat inventory of every showtime: all seat mutations go through here.
pub struct SeatInventoryManager {
    booking_repo: Arc<dyn BookingRepository>,
    showtime_repo: Arc<dyn ShowtimeRepository>,
    codes: Arc<dyn BookingCodeGenerator>,
    timezone: Tz,
}

impl SeatInventoryManager {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        showtime_repo: Arc<dyn ShowtimeRepository>,
        timezone: Tz,
    ) -> Self {
        Self::with_code_generator(booking_repo, showtime_repo, Arc::new(UuidCodeGenerator), timezone)
    }

    pub fn with_code_generator(
        booking_repo: Arc<dyn BookingRepository>,
        showtime_repo: Arc<dyn ShowtimeRepository>,
        codes: Arc<dyn BookingCodeGenerator>,
        timezone: Tz,
    ) -> Self {
        Self { booking_repo, showtime_repo, codes, timezone }
    }

    pub async fn create_booking(
        &self,
        request: BookingRequest,
        user: Option<&AuthenticatedUser>,
    ) -> Result<Booking, AppError> {
        let contact = resolve_contact(&request, user)?;
        let seats = seat_inventory::normalize_seats(&request.seats);
        seat_inventory::validate_request(&seats)?;

        if request.total_amount < 0 {
            return Err(AppError::Validation("Total amount must not be negative".into()));
        }

        let payment_method = present(request.payment_method)
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

        let mut booking = Booking::new(NewBookingParams {
            showtime_id: request.showtime_id,
            user_id: user.map(|u| u.id.clone()),
            customer_name: contact.name,
            customer_phone: contact.phone,
            customer_email: contact.email,
            seats,
            total_amount: request.total_amount,
            payment_method,
            booking_code: self.codes.next_code(),
        });

        for attempt in 1..=BOOKING_CODE_ATTEMPTS {
            match self.booking_repo.create_with_seats(&booking).await {
                Ok(created) => {
                    info!(
                        booking_id = %created.id,
                        booking_code = %created.booking_code,
                        showtime_id = %created.showtime_id,
                        seats = ?created.seats.0,
                        "Booking confirmed"
                    );
                    return Ok(created);
                }
                Err(e) if is_code_collision(&e) => {
                    warn!(attempt, code = %booking.booking_code, "Booking code collision, regenerating");
                    booking.booking_code = self.codes.next_code();
                }
                Err(AppError::Seat(e)) => {
                    warn!(showtime_id = %booking.showtime_id, "Booking rejected: {}", e);
                    return Err(AppError::Seat(e));
                }
                Err(e) => return Err(e),
            }
        }

        error!(showtime_id = %booking.showtime_id, "Exhausted booking code attempts");
        Err(AppError::InternalWithMsg("Could not allocate a unique booking code".into()))
    }

    pub async fn cancel_booking(&self, booking_id: &str) -> Result<Booking, AppError> {
        let cancelled = self.booking_repo.cancel(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        info!(booking_id = %cancelled.id, showtime_id = %cancelled.showtime_id, "Booking cancelled, seats released");
        Ok(cancelled)
    }

    pub async fn get_booking(&self, booking_id: &str) -> Result<Booking, AppError> {
        self.booking_repo.find_by_id(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }

    pub async fn get_booking_by_code(&self, code: &str) -> Result<Booking, AppError> {
        self.booking_repo.find_by_code(&code.trim().to_uppercase()).await?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    pub async fn available_dates(&self, movie_id: Option<&str>, cinema_id: Option<&str>) -> Result<Vec<NaiveDate>, AppError> {
        self.showtime_repo.list_available_dates(movie_id, cinema_id, self.today()).await
    }

    pub async fn available_times(&self, movie_id: &str, cinema_id: &str, date: NaiveDate) -> Result<Vec<AvailableTime>, AppError> {
        self.showtime_repo.list_available_times(movie_id, cinema_id, date).await
    }
}
