use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::StartupError;
use crate::state::AppState;
use crate::domain::services::booking_service::SeatInventoryManager;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_cinema_repo::PostgresCinemaRepo,
    postgres_movie_repo::PostgresMovieRepo, postgres_showtime_repo::PostgresShowtimeRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_cinema_repo::SqliteCinemaRepo,
    sqlite_movie_repo::SqliteMovieRepo, sqlite_showtime_repo::SqliteShowtimeRepo,
};

pub fn is_postgres_url(database_url: &str) -> bool {
    database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, StartupError> {
    if is_postgres_url(&config.database_url) {
        info!("Initializing PostgreSQL connection...");
        let pool = connect_postgres(&config.database_url).await?;
        run_postgres_migrations(&pool).await?;
        Ok(postgres_state(config, pool))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");
        let pool = connect_sqlite(&config.database_url).await?;
        run_sqlite_migrations(&pool).await?;
        Ok(sqlite_state(config, pool))
    }
}

pub async fn connect_postgres(database_url: &str) -> Result<PgPool, StartupError> {
    let opts = PgConnectOptions::from_str(database_url)?
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

pub async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, StartupError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

pub fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    let booking_repo = Arc::new(PostgresBookingRepo::new(pool.clone()));
    let showtime_repo = Arc::new(PostgresShowtimeRepo::new(pool.clone()));
    let seat_inventory = Arc::new(SeatInventoryManager::new(
        booking_repo.clone(),
        showtime_repo.clone(),
        config.timezone,
    ));

    AppState {
        config: config.clone(),
        movie_repo: Arc::new(PostgresMovieRepo::new(pool.clone())),
        cinema_repo: Arc::new(PostgresCinemaRepo::new(pool)),
        showtime_repo,
        booking_repo,
        seat_inventory,
    }
}

pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
    let showtime_repo = Arc::new(SqliteShowtimeRepo::new(pool.clone()));
    let seat_inventory = Arc::new(SeatInventoryManager::new(
        booking_repo.clone(),
        showtime_repo.clone(),
        config.timezone,
    ));

    AppState {
        config: config.clone(),
        movie_repo: Arc::new(SqliteMovieRepo::new(pool.clone())),
        cinema_repo: Arc::new(SqliteCinemaRepo::new(pool)),
        showtime_repo,
        booking_repo,
        seat_inventory,
    }
}

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), StartupError> {
    sqlx::migrate!("./migrations/postgres").run(pool).await?;
    Ok(())
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), StartupError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    Ok(())
}
