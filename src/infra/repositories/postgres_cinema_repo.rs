use crate::domain::{models::cinema::{Cinema, Screen}, ports::CinemaRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresCinemaRepo {
    pool: PgPool,
}

impl PostgresCinemaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CinemaRepository for PostgresCinemaRepo {
    async fn create(&self, cinema: &Cinema) -> Result<Cinema, AppError> {
        sqlx::query_as::<_, Cinema>(
            "INSERT INTO cinemas (id, name, address, province, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *"
        )
            .bind(&cinema.id)
            .bind(&cinema.name)
            .bind(&cinema.address)
            .bind(&cinema.province)
            .bind(cinema.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Cinema>, AppError> {
        sqlx::query_as::<_, Cinema>("SELECT * FROM cinemas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_screen(&self, screen: &Screen) -> Result<Screen, AppError> {
        sqlx::query_as::<_, Screen>(
            "INSERT INTO screens (id, cinema_id, screen_number, screen_type, total_seats, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&screen.id)
            .bind(&screen.cinema_id)
            .bind(screen.screen_number)
            .bind(&screen.screen_type)
            .bind(screen.total_seats)
            .bind(screen.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_screen(&self, id: &str) -> Result<Option<Screen>, AppError> {
        sqlx::query_as::<_, Screen>("SELECT * FROM screens WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_screens(&self, cinema_id: &str) -> Result<Vec<Screen>, AppError> {
        sqlx::query_as::<_, Screen>("SELECT * FROM screens WHERE cinema_id = $1 ORDER BY screen_number ASC")
            .bind(cinema_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
