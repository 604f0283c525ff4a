use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const DEFAULT_SCREEN_TYPE: &str = "2D";
pub const DEFAULT_TOTAL_SEATS: i32 = 100;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Cinema {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub province: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Cinema {
    pub fn new(name: String, address: Option<String>, province: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            address,
            province,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Screen {
    pub id: String,
    pub cinema_id: String,
    pub screen_number: i32,
    pub screen_type: String,
    pub total_seats: i32,
    pub created_at: DateTime<Utc>,
}

impl Screen {
    pub fn new(cinema_id: String, screen_number: i32, screen_type: String, total_seats: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            cinema_id,
            screen_number,
            screen_type,
            total_seats,
            created_at: Utc::now(),
        }
    }
}
