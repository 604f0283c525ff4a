use crate::domain::{models::cinema::{Cinema, Screen}, ports::CinemaRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCinemaRepo {
    pool: SqlitePool,
}

impl SqliteCinemaRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CinemaRepository for SqliteCinemaRepo {
    async fn create(&self, cinema: &Cinema) -> Result<Cinema, AppError> {
        sqlx::query_as::<_, Cinema>(
            "INSERT INTO cinemas (id, name, address, province, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
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
        sqlx::query_as::<_, Cinema>("SELECT * FROM cinemas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_screen(&self, screen: &Screen) -> Result<Screen, AppError> {
        sqlx::query_as::<_, Screen>(
            "INSERT INTO screens (id, cinema_id, screen_number, screen_type, total_seats, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *"
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
        sqlx::query_as::<_, Screen>("SELECT * FROM screens WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_screens(&self, cinema_id: &str) -> Result<Vec<Screen>, AppError> {
        sqlx::query_as::<_, Screen>("SELECT * FROM screens WHERE cinema_id = ? ORDER BY screen_number ASC")
            .bind(cinema_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
