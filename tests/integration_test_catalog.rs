mod common;

use axum::http::StatusCode;
use chrono::Duration;
use cinema_booking_backend::domain::models::auth::Role;
use common::TestApp;
use serde_json::{json, Value};

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_catalog_writes_require_admin() {
    let app = TestApp::new().await;
    let customer = app.mint_token(Role::User, None);
    let payload = json!({ "title": "Dune: Part Two" });

    let res = app.send("POST", "/api/v1/movies", Some(payload.clone()), None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.send("POST", "/api/v1/movies", Some(payload.clone()), Some(&customer)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.send("POST", "/api/v1/cinemas", Some(json!({ "name": "Galaxy" })), Some(&customer)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let super_admin = app.mint_token(Role::SuperAdmin, None);
    let res = app.send("POST", "/api/v1/movies", Some(payload), Some(&super_admin)).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_writes_without_csrf_header_are_forbidden() {
    let app = TestApp::new().await;
    let mut admin = app.admin();
    admin.csrf_token = "wrong".to_string();

    let res = app.send("POST", "/api/v1/movies", Some(json!({ "title": "Dune" })), Some(&admin)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_movie_create_fetch_update() {
    let app = TestApp::new().await;
    let admin = app.admin();

    let res = app.send("POST", "/api/v1/movies", Some(json!({
        "title": "Mai",
        "rating": "T18",
        "genre": "Drama",
        "duration": 131,
        "cast": ["Phuong Anh Dao", "Tuan Tran"],
        "release_date": "2024-02-10",
    })), Some(&admin)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let created = parse_body(res).await;
    assert_eq!(created["status"], "coming");
    assert_eq!(created["cast"], json!(["Phuong Anh Dao", "Tuan Tran"]));

    let id = created["id"].as_str().unwrap();
    let fetched = parse_body(app.get(&format!("/api/v1/movies/{}", id)).await).await;
    assert_eq!(fetched["title"], "Mai");

    let res = app.send("PUT", &format!("/api/v1/movies/{}", id), Some(json!({
        "title": "Mai",
        "status": "showing",
        "duration": 131,
    })), Some(&admin)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["status"], "showing");
    assert_eq!(updated["created_at"], created["created_at"]);

    let res = app.send("PUT", &format!("/api/v1/movies/{}", id), Some(json!({
        "title": "Mai",
        "status": "archived",
    })), Some(&admin)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.get("/api/v1/movies/unknown").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cinema_and_screens() {
    let app = TestApp::new().await;
    let admin = app.admin();

    let cinema = parse_body(app.send("POST", "/api/v1/cinemas", Some(json!({
        "name": "Galaxy Nguyen Du",
        "address": "116 Nguyen Du",
        "province": "Ho Chi Minh",
    })), Some(&admin)).await).await;
    let cinema_id = cinema["id"].as_str().unwrap();

    let uri = format!("/api/v1/cinemas/{}/screens", cinema_id);
    let res = app.send("POST", &uri, Some(json!({ "screen_number": 2, "screen_type": "IMAX", "total_seats": 180 })), Some(&admin)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let res = app.send("POST", &uri, Some(json!({ "screen_number": 1 })), Some(&admin)).await;
    let default_screen = parse_body(res).await;
    assert_eq!(default_screen["screen_type"], "2D");
    assert_eq!(default_screen["total_seats"], 100);

    let screens = parse_body(app.get(&uri).await).await;
    let numbers: Vec<i64> = screens.as_array().unwrap().iter().map(|s| s["screen_number"].as_i64().unwrap()).collect();
    assert_eq!(numbers, vec![1, 2]);

    let res = app.get(&format!("/api/v1/cinemas/{}", cinema_id)).await;
    assert_eq!(parse_body(res).await["name"], "Galaxy Nguyen Du");

    let res = app.send("POST", "/api/v1/cinemas/unknown/screens", Some(json!({ "screen_number": 1 })), Some(&admin)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_showtime_defaults_capacity_to_screen() {
    let app = TestApp::new().await;
    let admin = app.admin();
    let movie = app.seed_movie("Dune").await;
    let cinema = app.seed_cinema("Galaxy Nguyen Du").await;
    let screen = app.seed_screen(&cinema.id, 1, 120).await;
    let date = app.state.seat_inventory.today() + Duration::days(1);

    let res = app.send("POST", "/api/v1/showtimes", Some(json!({
        "movie_id": movie.id,
        "cinema_id": cinema.id,
        "screen_id": screen.id,
        "show_date": date.format("%Y-%m-%d").to_string(),
        "show_time": "19:30:00",
        "price": 95_000,
    })), Some(&admin)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let created = parse_body(res).await;
    assert_eq!(created["capacity"], 120);
    assert_eq!(created["available_seats"], 120);
    assert_eq!(created["booked_seats"], json!([]));
    assert!(created.get("version").is_none());

    let fetched = parse_body(app.get(&format!("/api/v1/showtimes/{}", created["id"].as_str().unwrap())).await).await;
    assert_eq!(fetched["show_time"], "19:30:00");
}

#[tokio::test]
async fn test_create_showtime_validates_references() {
    let app = TestApp::new().await;
    let admin = app.admin();
    let movie = app.seed_movie("Dune").await;
    let cinema = app.seed_cinema("Galaxy Nguyen Du").await;
    let other_cinema = app.seed_cinema("Galaxy Tan Binh").await;
    let foreign_screen = app.seed_screen(&other_cinema.id, 1, 80).await;
    let date = app.state.seat_inventory.today() + Duration::days(1);

    let payload = |screen_id: &str, price: i64| json!({
        "movie_id": movie.id,
        "cinema_id": cinema.id,
        "screen_id": screen_id,
        "show_date": date.format("%Y-%m-%d").to_string(),
        "show_time": "19:30:00",
        "price": price,
    });

    let res = app.send("POST", "/api/v1/showtimes", Some(payload(&foreign_screen.id, 90_000)), Some(&admin)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send("POST", "/api/v1/showtimes", Some(payload("missing", 90_000)), Some(&admin)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let own_screen = app.seed_screen(&cinema.id, 1, 80).await;
    let res = app.send("POST", "/api/v1/showtimes", Some(payload(&own_screen.id, -1)), Some(&admin)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let res = app.get("/health").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "ok");
}
