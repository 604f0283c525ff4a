use cinema_booking_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::models::{
        auth::{Claims, Role},
        booking::generate_booking_code,
        cinema::{Cinema, Screen},
        movie::{Movie, NewMovieParams},
        showtime::{NewShowtimeParams, Showtime},
    },
    domain::ports::BookingCodeGenerator,
    domain::services::booking_service::SeatInventoryManager,
    infra::factory::{connect_sqlite, run_sqlite_migrations, sqlite_state},
};
use sqlx::{Pool, Sqlite};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tower::ServiceExt;
use serde_json::Value;

pub const TEST_AUDIENCE: &str = "cinema-frontend";

pub struct AuthHeaders {
    pub user_id: String,
    pub access_token: String,
    pub csrf_token: String,
}

/// Hands out queued codes first, then random ones.
pub struct ScriptedCodes {
    queue: Mutex<VecDeque<String>>,
}

impl ScriptedCodes {
    pub fn new(codes: &[&str]) -> Self {
        Self { queue: Mutex::new(codes.iter().map(|c| c.to_string()).collect()) }
    }
}

impl BookingCodeGenerator for ScriptedCodes {
    fn next_code(&self) -> String {
        self.queue.lock().unwrap().pop_front().unwrap_or_else(generate_booking_code)
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::build(None).await
    }

    pub async fn with_code_generator(codes: Arc<dyn BookingCodeGenerator>) -> Self {
        Self::build(Some(codes)).await
    }

    async fn build(codes: Option<Arc<dyn BookingCodeGenerator>>) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let pool = connect_sqlite(&db_url).await.expect("Failed to connect to test db");
        run_sqlite_migrations(&pool).await.expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            jwt_public_key: include_str!("../tests/keys/test_public.pem").to_string(),
            auth_audience: TEST_AUDIENCE.to_string(),
            timezone: chrono_tz::Asia::Ho_Chi_Minh,
        };

        let mut state = sqlite_state(&config, pool.clone());
        if let Some(codes) = codes {
            state.seat_inventory = Arc::new(SeatInventoryManager::with_code_generator(
                state.booking_repo.clone(),
                state.showtime_repo.clone(),
                codes,
                config.timezone,
            ));
        }
        let state = Arc::new(state);

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Signs an access token with the test key, the way the auth service would.
    pub fn mint_token(&self, role: Role, phone: Option<&str>) -> AuthHeaders {
        let user_id = Uuid::new_v4().to_string();
        let csrf_token = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp() as usize;

        let claims = Claims {
            iss: "test-issuer".to_string(),
            sub: user_id.clone(),
            aud: TEST_AUDIENCE.to_string(),
            exp: now + 3600,
            iat: now,
            jti: Uuid::new_v4().to_string(),
            role,
            email: "lan.nguyen@example.com".to_string(),
            name: "Nguyen Lan".to_string(),
            phone: phone.map(str::to_string),
            csrf_token: csrf_token.clone(),
        };

        let key = EncodingKey::from_ed_pem(include_bytes!("../tests/keys/test_private.pem")).unwrap();
        let access_token = encode(&Header::new(Algorithm::EdDSA), &claims, &key).unwrap();

        AuthHeaders { user_id, access_token, csrf_token }
    }

    pub fn admin(&self) -> AuthHeaders {
        self.mint_token(Role::Admin, None)
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>, auth: Option<&AuthHeaders>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send("GET", uri, None, None).await
    }

    pub async fn seed_movie(&self, title: &str) -> Movie {
        let movie = Movie::new(NewMovieParams {
            title: title.to_string(),
            poster: Some(format!("https://cdn.example.com/{}.jpg", title.to_lowercase())),
            rating: Some("T13".to_string()),
            genre: Some("Action".to_string()),
            duration: Some(120),
            status: "showing".to_string(),
            trailer: None,
            description: None,
            director: None,
            cast: vec![],
            release_date: None,
        });
        self.state.movie_repo.create(&movie).await.unwrap()
    }

    pub async fn seed_cinema(&self, name: &str) -> Cinema {
        let cinema = Cinema::new(name.to_string(), Some("116 Nguyen Du".to_string()), Some("Ho Chi Minh".to_string()));
        self.state.cinema_repo.create(&cinema).await.unwrap()
    }

    pub async fn seed_screen(&self, cinema_id: &str, number: i32, total_seats: i32) -> Screen {
        let screen = Screen::new(cinema_id.to_string(), number, "2D".to_string(), total_seats);
        self.state.cinema_repo.create_screen(&screen).await.unwrap()
    }

    pub async fn seed_showtime(
        &self,
        movie_id: &str,
        cinema_id: &str,
        screen_id: &str,
        date: NaiveDate,
        time: &str,
        capacity: i32,
    ) -> Showtime {
        let showtime = Showtime::new(NewShowtimeParams {
            movie_id: movie_id.to_string(),
            cinema_id: cinema_id.to_string(),
            screen_id: screen_id.to_string(),
            show_date: date,
            show_time: NaiveTime::parse_from_str(time, "%H:%M:%S").unwrap(),
            price: 90_000,
            capacity,
        });
        self.state.showtime_repo.create(&showtime).await.unwrap()
    }

    /// Movie, cinema, screen and one showtime tomorrow at 19:30 with `capacity` seats.
    pub async fn seed_bookable_showtime(&self, capacity: i32) -> Showtime {
        let movie = self.seed_movie("Dune").await;
        let cinema = self.seed_cinema("Galaxy Nguyen Du").await;
        let screen = self.seed_screen(&cinema.id, 1, capacity).await;
        let tomorrow = self.state.seat_inventory.today().succ_opt().unwrap();
        self.seed_showtime(&movie.id, &cinema.id, &screen.id, tomorrow, "19:30:00", capacity).await
    }

    pub async fn showtime(&self, id: &str) -> Showtime {
        self.state.showtime_repo.find_by_id(id).await.unwrap().unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
