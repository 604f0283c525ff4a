use std::env;
use chrono_tz::Tz;
use crate::error::StartupError;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_AUTH_AUDIENCE: &str = "cinema-frontend";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Ho_Chi_Minh;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_public_key: String, // Ed25519 public key (PEM)
    pub auth_audience: String,
    pub timezone: Tz,
}

impl Config {
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(StartupError::MissingEnv("DATABASE_URL"))?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| StartupError::InvalidEnv { name: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        // Keys pasted into a single-line env var usually carry escaped newlines
        let jwt_public_key = lookup("JWT_PUBLIC_KEY")
            .ok_or(StartupError::MissingEnv("JWT_PUBLIC_KEY"))?
            .replace("\\n", "\n");

        let auth_audience = lookup("AUTH_AUDIENCE").unwrap_or_else(|| DEFAULT_AUTH_AUDIENCE.to_string());

        let timezone = match lookup("CINEMA_TIMEZONE") {
            Some(raw) => raw.parse::<Tz>().map_err(|_| StartupError::InvalidEnv { name: "CINEMA_TIMEZONE", value: raw })?,
            None => DEFAULT_TIMEZONE,
        };

        Ok(Self { database_url, port, jwt_public_key, auth_audience, timezone })
    }
}
