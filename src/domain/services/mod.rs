pub mod booking_service;
pub mod seat_inventory;
