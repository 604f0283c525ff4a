use crate::domain::{
    models::{booking::{Booking, BookingStatus}, showtime::Showtime},
    ports::BookingRepository,
    services::seat_inventory::{self, SeatState},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use sqlx::types::Json;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row lock on the showtime; concurrent writers queue here until commit.
async fn lock_showtime(tx: &mut Transaction<'_, Postgres>, id: &str) -> Result<Option<Showtime>, AppError> {
    sqlx::query_as::<_, Showtime>("SELECT * FROM showtimes WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::Database)
}

async fn write_seat_state(tx: &mut Transaction<'_, Postgres>, showtime: &Showtime, state: &SeatState) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE showtimes SET booked_seats = $1, available_seats = $2, version = version + 1
         WHERE id = $3 AND version = $4"
    )
        .bind(Json(&state.booked_seats))
        .bind(state.available_seats)
        .bind(&showtime.id)
        .bind(showtime.version)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;

    if result.rows_affected() == 0 {
        return Err(AppError::Conflict("Showtime was modified concurrently, please retry".into()));
    }
    Ok(())
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create_with_seats(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let showtime = lock_showtime(&mut tx, &booking.showtime_id).await?
            .ok_or(AppError::NotFound("Showtime not found".into()))?;

        let next = seat_inventory::reserve(&showtime, &booking.seats)?;
        write_seat_state(&mut tx, &showtime, &next).await?;

        let created = sqlx::query_as::<_, Booking>(
            r#"INSERT INTO bookings (id, showtime_id, user_id, customer_name, customer_phone, customer_email, seats, total_amount, booking_code, status, payment_method, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
               RETURNING *"#
        )
            .bind(&booking.id)
            .bind(&booking.showtime_id)
            .bind(&booking.user_id)
            .bind(&booking.customer_name)
            .bind(&booking.customer_phone)
            .bind(&booking.customer_email)
            .bind(&booking.seats)
            .bind(booking.total_amount)
            .bind(&booking.booking_code)
            .bind(&booking.status)
            .bind(&booking.payment_method)
            .bind(booking.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn cancel(&self, id: &str) -> Result<Option<Booking>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let Some(booking) = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)? else {
            return Ok(None);
        };

        if booking.is_cancelled() {
            return Ok(Some(booking));
        }

        if let Some(showtime) = lock_showtime(&mut tx, &booking.showtime_id).await? {
            let next = seat_inventory::release(&showtime, &booking.seats);
            write_seat_state(&mut tx, &showtime, &next).await?;
        }

        let cancelled = sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *")
            .bind(BookingStatus::Cancelled.as_str())
            .bind(&booking.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(Some(cancelled))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
