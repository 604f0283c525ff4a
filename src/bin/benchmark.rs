use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

const DURATION_SECS: u64 = 20;
const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const CONTENTION_REQUESTS: usize = 200;
const CONTENTION_ROWS: [char; 3] = ['A', 'B', 'C'];
const CONTENTION_SEATS_PER_ROW: u32 = 10;

struct Target {
    name: &'static str,
    url: String,
}

/// Load generator against a running server.
///
/// Needs `BENCH_SHOWTIME_ID` pointing at a seeded showtime; catalog writes
/// require an admin token, so the benchmark does not create its own data.
/// The contention stage books seats on that showtime and cancels them again.
#[tokio::main]
async fn main() {
    let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let Ok(showtime_id) = std::env::var("BENCH_SHOWTIME_ID") else {
        eprintln!("{}", "❌ BENCH_SHOWTIME_ID must name an existing showtime.".red().bold());
        return;
    };

    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", base_url);

    let client = match Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    if client.get(format!("{}/health", base_url)).send().await.is_err() {
        eprintln!("{}", format!("❌ Server is NOT reachable at {}. Please start it first.", base_url).red().bold());
        return;
    }

    let showtime = match fetch_showtime(&client, &base_url, &showtime_id).await {
        Some(showtime) => showtime,
        None => {
            eprintln!("{}", format!("❌ Showtime {} not found.", showtime_id).red().bold());
            return;
        }
    };
    let movie_id = showtime["movie_id"].as_str().unwrap_or_default().to_string();
    let cinema_id = showtime["cinema_id"].as_str().unwrap_or_default().to_string();
    let show_date = showtime["show_date"].as_str().unwrap_or_default().to_string();

    println!("   Showtime:  {}", showtime_id);
    println!("   Available: {}", showtime["available_seats"]);

    let targets = vec![
        Target {
            name: "Health Check",
            url: format!("{}/health", base_url),
        },
        Target {
            name: "Showtime Seat State",
            url: format!("{}/api/v1/showtimes/{}", base_url, showtime_id),
        },
        Target {
            name: "Showtime Listing (Joined)",
            url: format!("{}/api/v1/showtimes?movie_id={}&cinema_id={}", base_url, movie_id, cinema_id),
        },
        Target {
            name: "Available Dates",
            url: format!("{}/api/v1/showtimes/dates/available?movie_id={}&cinema_id={}", base_url, movie_id, cinema_id),
        },
        Target {
            name: "Available Times",
            url: format!(
                "{}/api/v1/showtimes/times/available?movie_id={}&cinema_id={}&show_date={}",
                base_url, movie_id, cinema_id, show_date
            ),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }

    run_seat_contention(&client, &base_url, &showtime_id).await;
}

async fn fetch_showtime(client: &Client, base_url: &str, showtime_id: &str) -> Option<Value> {
    let res = client.get(format!("{}/api/v1/showtimes/{}", base_url, showtime_id))
        .send()
        .await
        .ok()?;
    if !res.status().is_success() {
        return None;
    }
    res.json().await.ok()
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let Some(per_second) = NonZeroU32::new(rps) else { return };
    let limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = client.get(&url).send().await;
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = match Histogram::<u64>::new(3) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Histogram setup failed: {}", e);
            return;
        }
    };
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        let _ = histogram.record(latency.as_micros() as u64);
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}

/// Fires overlapping booking requests at a small seat pool, then checks that
/// no seat ended up in two confirmed bookings and that the counter still
/// matches the seat set.
async fn run_seat_contention(client: &Client, base_url: &str, showtime_id: &str) {
    println!("\n{}", "=".repeat(60));
    println!("Seat Contention: {} concurrent bookings", CONTENTION_REQUESTS.to_string().cyan().bold());
    println!("{}", "=".repeat(60));

    let pool: Vec<String> = CONTENTION_ROWS.iter()
        .flat_map(|row| (1..=CONTENTION_SEATS_PER_ROW).map(move |n| format!("{}{}", row, n)))
        .collect();

    // thread_rng is not Send; pick every request's seats up front
    let requests: Vec<Vec<String>> = {
        let mut rng = rand::thread_rng();
        (0..CONTENTION_REQUESTS)
            .map(|_| {
                let count = rng.gen_range(1..=2);
                pool.choose_multiple(&mut rng, count).cloned().collect()
            })
            .collect()
    };

    let mut tasks = JoinSet::new();
    let started = Instant::now();

    for (i, seats) in requests.into_iter().enumerate() {
        let client = client.clone();
        let url = format!("{}/api/v1/bookings", base_url);
        let body = json!({
            "showtime_id": showtime_id,
            "seats": seats,
            "customer_name": format!("Bench {}", i),
            "customer_phone": "0900000000",
            "customer_email": format!("bench{}@example.com", i),
            "total_amount": 0,
        });

        tasks.spawn(async move {
            let res = client.post(&url).json(&body).send().await.ok()?;
            let status = res.status();
            let body: Option<Value> = if status.is_success() { res.json().await.ok() } else { None };
            Some((status, body))
        });
    }

    let mut confirmed: Vec<Value> = Vec::new();
    let mut statuses: HashMap<u16, usize> = HashMap::new();
    let mut transport_errors = 0;

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some((status, body))) => {
                *statuses.entry(status.as_u16()).or_default() += 1;
                if status == StatusCode::OK {
                    if let Some(body) = body {
                        confirmed.push(body);
                    }
                }
            }
            _ => transport_errors += 1,
        }
    }

    println!("Elapsed: {:.2}s", started.elapsed().as_secs_f64());
    let mut codes: Vec<_> = statuses.iter().collect();
    codes.sort();
    for (code, count) in codes {
        println!("   HTTP {}: {}", code, count);
    }
    if transport_errors > 0 {
        println!("   Transport errors: {}", transport_errors);
    }

    let mut owners: HashMap<String, usize> = HashMap::new();
    for booking in &confirmed {
        for seat in booking["seats"].as_array().into_iter().flatten() {
            if let Some(seat) = seat.as_str() {
                *owners.entry(seat.to_string()).or_default() += 1;
            }
        }
    }
    let double_sold: Vec<_> = owners.iter().filter(|(_, n)| **n > 1).map(|(s, _)| s.clone()).collect();

    if double_sold.is_empty() {
        println!("{}", format!("✅ No seat sold twice ({} seats across {} bookings)", owners.len(), confirmed.len()).green());
    } else {
        println!("{}", format!("❌ Seats sold more than once: {:?}", double_sold).red().bold());
    }

    if let Some(showtime) = fetch_showtime(client, base_url, showtime_id).await {
        let capacity = showtime["capacity"].as_i64().unwrap_or_default();
        let available = showtime["available_seats"].as_i64().unwrap_or_default();
        let booked = showtime["booked_seats"].as_array().map(|a| a.len() as i64).unwrap_or_default();
        if available + booked == capacity {
            println!("{}", format!("✅ Counter consistent: {} available + {} booked = {}", available, booked, capacity).green());
        } else {
            println!("{}", format!("❌ Counter drift: {} available + {} booked != {}", available, booked, capacity).red().bold());
        }
    }

    let mut released = 0;
    for booking in &confirmed {
        let Some(id) = booking["id"].as_str() else { continue };
        let res = client.patch(format!("{}/api/v1/bookings/{}/cancel", base_url, id)).send().await;
        if res.is_ok_and(|r| r.status().is_success()) {
            released += 1;
        }
    }
    println!("Released {} benchmark bookings.", released);
}
