use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

pub const MOVIE_STATUSES: [&str; 3] = ["showing", "coming", "stopped"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub poster: Option<String>,
    pub rating: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i32>,
    pub status: String,
    pub trailer: Option<String>,
    pub description: Option<String>,
    pub director: Option<String>,
    #[sqlx(rename = "cast_members")]
    pub cast: Json<Vec<String>>,
    pub release_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewMovieParams {
    pub title: String,
    pub poster: Option<String>,
    pub rating: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i32>,
    pub status: String,
    pub trailer: Option<String>,
    pub description: Option<String>,
    pub director: Option<String>,
    pub cast: Vec<String>,
    pub release_date: Option<NaiveDate>,
}

impl Movie {
    pub fn new(params: NewMovieParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            poster: params.poster,
            rating: params.rating,
            genre: params.genre,
            duration: params.duration,
            status: params.status,
            trailer: params.trailer,
            description: params.description,
            director: params.director,
            cast: Json(params.cast),
            release_date: params.release_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every editable field, keeping identity and creation time.
    pub fn apply(&mut self, params: NewMovieParams) {
        self.title = params.title;
        self.poster = params.poster;
        self.rating = params.rating;
        self.genre = params.genre;
        self.duration = params.duration;
        self.status = params.status;
        self.trailer = params.trailer;
        self.description = params.description;
        self.director = params.director;
        self.cast = Json(params.cast);
        self.release_date = params.release_date;
        self.updated_at = Utc::now();
    }
}
