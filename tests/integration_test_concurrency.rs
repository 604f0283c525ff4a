mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::json;
use tokio::task::JoinSet;
use tower::ServiceExt;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_seat_raced_exactly_one_wins() {
    let app = TestApp::new().await;
    let showtime = app.seed_bookable_showtime(100).await;

    let mut set = JoinSet::new();
    for i in 0..12 {
        let router = app.router.clone();
        let body = json!({
            "showtime_id": showtime.id,
            "seats": ["E7"],
            "customer_name": format!("Racer {}", i),
            "customer_phone": "0944444444",
            "customer_email": format!("racer{}@example.com", i),
            "total_amount": 90_000,
        });
        set.spawn(async move {
            router.oneshot(
                Request::builder().method("POST").uri("/api/v1/bookings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())).unwrap()
            ).await.unwrap().status()
        });
    }

    let mut statuses = Vec::new();
    while let Some(res) = set.join_next().await {
        statuses.push(res.unwrap());
    }

    // Writers queue on the database lock, so every loser sees the seat as taken
    let winners = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    assert_eq!(winners, 1, "statuses: {:?}", statuses);
    assert!(statuses.iter().all(|s| *s == StatusCode::OK || *s == StatusCode::BAD_REQUEST), "statuses: {:?}", statuses);

    let after = app.showtime(&showtime.id).await;
    assert_eq!(after.booked_seats.0, vec!["E7"]);
    assert_eq!(after.available_seats, 99);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_disjoint_bookings_keep_counter_consistent() {
    let app = TestApp::new().await;
    let showtime = app.seed_bookable_showtime(100).await;

    let mut set = JoinSet::new();
    for i in 1..=10 {
        let router = app.router.clone();
        let body = json!({
            "showtime_id": showtime.id,
            "seats": [format!("F{}", i)],
            "customer_name": "Vo Thanh",
            "customer_phone": "0955555555",
            "customer_email": "thanh@example.com",
            "total_amount": 90_000,
        });
        set.spawn(async move {
            router.oneshot(
                Request::builder().method("POST").uri("/api/v1/bookings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())).unwrap()
            ).await.unwrap().status()
        });
    }

    let mut confirmed = 0;
    while let Some(res) = set.join_next().await {
        if res.unwrap() == StatusCode::OK {
            confirmed += 1;
        }
    }

    let after = app.showtime(&showtime.id).await;
    assert_eq!(confirmed, 10);
    assert!(after.is_consistent());
    assert_eq!(after.booked_seats.len(), 10);
    assert_eq!(after.available_seats, 90);
}
