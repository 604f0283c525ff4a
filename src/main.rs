#[tokio::main]
async fn main() {
    if let Err(e) = cinema_booking_backend::run().await {
        eprintln!("cinema-booking-backend failed to start: {e}");
        std::process::exit(1);
    }
}
