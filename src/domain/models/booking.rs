use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

pub const BOOKING_CODE_PREFIX: &str = "GC";
pub const BOOKING_CODE_RANDOM_LEN: usize = 8;
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub showtime_id: String,
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub seats: Json<Vec<String>>,
    pub total_amount: i64,
    pub booking_code: String,
    pub status: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub showtime_id: String,
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub seats: Vec<String>,
    pub total_amount: i64,
    pub payment_method: String,
    pub booking_code: String,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            showtime_id: params.showtime_id,
            user_id: params.user_id,
            customer_name: params.customer_name,
            customer_phone: params.customer_phone,
            customer_email: params.customer_email,
            seats: Json(params.seats),
            total_amount: params.total_amount,
            booking_code: params.booking_code,
            status: BookingStatus::Confirmed.as_str().to_string(),
            payment_method: params.payment_method,
            created_at: Utc::now(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled.as_str()
    }
}

/// `GC` followed by the first eight hex digits of a random UUID, upper-cased.
pub fn generate_booking_code() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{}{}", BOOKING_CODE_PREFIX, token[..BOOKING_CODE_RANDOM_LEN].to_uppercase())
}

pub fn is_valid_booking_code(code: &str) -> bool {
    code.len() == BOOKING_CODE_PREFIX.len() + BOOKING_CODE_RANDOM_LEN
        && code.starts_with(BOOKING_CODE_PREFIX)
        && code[BOOKING_CODE_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_have_chain_prefix_and_eight_uppercase_chars() {
        for _ in 0..200 {
            let code = generate_booking_code();
            assert!(is_valid_booking_code(&code), "bad code {}", code);
        }
    }

    #[test]
    fn code_validation_rejects_wrong_shapes() {
        assert!(is_valid_booking_code("GCAB12CD34"));
        assert!(!is_valid_booking_code("GCab12cd34"));
        assert!(!is_valid_booking_code("XXAB12CD34"));
        assert!(!is_valid_booking_code("GCAB12CD3"));
        assert!(!is_valid_booking_code("GCAB12CD345"));
        assert!(!is_valid_booking_code("GCAB12-D34"));
    }

    #[test]
    fn new_booking_starts_confirmed() {
        let booking = Booking::new(NewBookingParams {
            showtime_id: "st".into(),
            user_id: None,
            customer_name: "An".into(),
            customer_phone: "0900000000".into(),
            customer_email: "an@example.com".into(),
            seats: vec!["A1".into()],
            total_amount: 90_000,
            payment_method: DEFAULT_PAYMENT_METHOD.into(),
            booking_code: generate_booking_code(),
        });
        assert_eq!(booking.status, "confirmed");
        assert!(!booking.is_cancelled());
    }
}
