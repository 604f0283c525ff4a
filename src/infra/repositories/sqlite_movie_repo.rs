use crate::domain::{models::movie::Movie, ports::MovieRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteMovieRepo {
    pool: SqlitePool,
}

impl SqliteMovieRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for SqliteMovieRepo {
    async fn create(&self, movie: &Movie) -> Result<Movie, AppError> {
        sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (id, title, poster, rating, genre, duration, status, trailer, description, director, cast_members, release_date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&movie.id).bind(&movie.title).bind(&movie.poster).bind(&movie.rating)
            .bind(&movie.genre).bind(movie.duration).bind(&movie.status).bind(&movie.trailer)
            .bind(&movie.description).bind(&movie.director).bind(&movie.cast).bind(movie.release_date)
            .bind(movie.created_at).bind(movie.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, AppError> {
        sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, movie: &Movie) -> Result<Movie, AppError> {
        sqlx::query_as::<_, Movie>(
            "UPDATE movies SET title=?, poster=?, rating=?, genre=?, duration=?, status=?, trailer=?, description=?, director=?, cast_members=?, release_date=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&movie.title).bind(&movie.poster).bind(&movie.rating).bind(&movie.genre)
            .bind(movie.duration).bind(&movie.status).bind(&movie.trailer).bind(&movie.description)
            .bind(&movie.director).bind(&movie.cast).bind(movie.release_date).bind(movie.updated_at)
            .bind(&movie.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Movie not found".into()))
    }
}
