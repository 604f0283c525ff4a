use crate::domain::{
    models::showtime::{Showtime, ShowtimeDetails, ShowtimeFilter, AvailableTime},
    ports::ShowtimeRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::NaiveDate;

pub struct PostgresShowtimeRepo {
    pool: PgPool,
}

impl PostgresShowtimeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShowtimeRepository for PostgresShowtimeRepo {
    async fn create(&self, showtime: &Showtime) -> Result<Showtime, AppError> {
        sqlx::query_as::<_, Showtime>(
            r#"INSERT INTO showtimes (id, movie_id, cinema_id, screen_id, show_date, show_time, price, capacity, available_seats, booked_seats, version, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
               RETURNING *"#
        )
            .bind(&showtime.id)
            .bind(&showtime.movie_id)
            .bind(&showtime.cinema_id)
            .bind(&showtime.screen_id)
            .bind(showtime.show_date)
            .bind(showtime.show_time)
            .bind(showtime.price)
            .bind(showtime.capacity)
            .bind(showtime.available_seats)
            .bind(&showtime.booked_seats)
            .bind(showtime.version)
            .bind(showtime.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Showtime>, AppError> {
        sqlx::query_as::<_, Showtime>("SELECT * FROM showtimes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_with_details(&self, filter: &ShowtimeFilter) -> Result<Vec<ShowtimeDetails>, AppError> {
        sqlx::query_as::<_, ShowtimeDetails>(
            r#"SELECT s.id, s.show_date, s.show_time, s.price, s.available_seats,
                      m.title AS movie_title, c.name AS cinema_name, sc.screen_type
               FROM showtimes s
               JOIN movies m ON m.id = s.movie_id
               JOIN cinemas c ON c.id = s.cinema_id
               JOIN screens sc ON sc.id = s.screen_id
               WHERE ($1::TEXT IS NULL OR s.movie_id = $1)
                 AND ($2::TEXT IS NULL OR s.cinema_id = $2)
                 AND ($3::DATE IS NULL OR s.show_date = $3)
               ORDER BY s.show_date ASC, s.show_time ASC"#
        )
            .bind(&filter.movie_id)
            .bind(&filter.cinema_id)
            .bind(filter.show_date)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_available_dates(&self, movie_id: Option<&str>, cinema_id: Option<&str>, from: NaiveDate) -> Result<Vec<NaiveDate>, AppError> {
        sqlx::query_scalar::<_, NaiveDate>(
            r#"SELECT DISTINCT show_date FROM showtimes
               WHERE ($1::TEXT IS NULL OR movie_id = $1)
                 AND ($2::TEXT IS NULL OR cinema_id = $2)
                 AND show_date >= $3
                 AND available_seats > 0
               ORDER BY show_date ASC"#
        )
            .bind(movie_id)
            .bind(cinema_id)
            .bind(from)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_available_times(&self, movie_id: &str, cinema_id: &str, date: NaiveDate) -> Result<Vec<AvailableTime>, AppError> {
        sqlx::query_as::<_, AvailableTime>(
            r#"SELECT show_time AS time, id AS showtime_id, available_seats FROM showtimes
               WHERE movie_id = $1 AND cinema_id = $2 AND show_date = $3 AND available_seats > 0
               ORDER BY show_time ASC"#
        )
            .bind(movie_id)
            .bind(cinema_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
