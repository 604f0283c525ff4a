use crate::domain::{models::movie::Movie, ports::MovieRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresMovieRepo {
    pool: PgPool,
}

impl PostgresMovieRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepo {
    async fn create(&self, movie: &Movie) -> Result<Movie, AppError> {
        sqlx::query_as::<_, Movie>(
            r#"INSERT INTO movies (id, title, poster, rating, genre, duration, status, trailer, description, director, cast_members, release_date, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
               RETURNING *"#
        )
            .bind(&movie.id)
            .bind(&movie.title)
            .bind(&movie.poster)
            .bind(&movie.rating)
            .bind(&movie.genre)
            .bind(movie.duration)
            .bind(&movie.status)
            .bind(&movie.trailer)
            .bind(&movie.description)
            .bind(&movie.director)
            .bind(&movie.cast)
            .bind(movie.release_date)
            .bind(movie.created_at)
            .bind(movie.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, AppError> {
        sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, movie: &Movie) -> Result<Movie, AppError> {
        sqlx::query_as::<_, Movie>(
            r#"UPDATE movies SET title = $1, poster = $2, rating = $3, genre = $4, duration = $5, status = $6,
                   trailer = $7, description = $8, director = $9, cast_members = $10, release_date = $11, updated_at = $12
               WHERE id = $13
               RETURNING *"#
        )
            .bind(&movie.title)
            .bind(&movie.poster)
            .bind(&movie.rating)
            .bind(&movie.genre)
            .bind(movie.duration)
            .bind(&movie.status)
            .bind(&movie.trailer)
            .bind(&movie.description)
            .bind(&movie.director)
            .bind(&movie.cast)
            .bind(movie.release_date)
            .bind(movie.updated_at)
            .bind(&movie.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Movie not found".into()))
    }
}
