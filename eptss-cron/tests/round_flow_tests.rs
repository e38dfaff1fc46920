//! End-to-end flow through the HTTP surface
//!
//! Seeds a round around the real current date, then exercises the
//! request-time phase endpoint and the assignment cron endpoint.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Days, NaiveDate, Utc};
use eptss_common::db::init_schema;
use eptss_cron::notify::LogNotifier;
use eptss_cron::{build_router, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

const SECRET: &str = "s3cret";

async fn seeded_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    init_schema(&pool).await.unwrap();
    pool
}

fn router(pool: SqlitePool) -> Router {
    build_router(AppState::new(
        pool,
        Some(SECRET.to_string()),
        Arc::new(LogNotifier),
    ))
}

async fn insert_round(pool: &SqlitePool, milestones: [NaiveDate; 5]) {
    sqlx::query(
        "INSERT INTO rounds (id, slug, signup_opens, voting_opens, covering_begins, covers_due, listening_party) \
         VALUES (1, 'round-1', $1, $2, $3, $4, $5)",
    )
    .bind(milestones[0].to_string())
    .bind(milestones[1].to_string())
    .bind(milestones[2].to_string())
    .bind(milestones[3].to_string())
    .bind(milestones[4].to_string())
    .execute(pool)
    .await
    .unwrap();
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn current_round_reports_signups_phase() {
    let pool = seeded_pool().await;
    let today = Utc::now().date_naive();
    insert_round(
        &pool,
        [
            today - Days::new(10),
            today + Days::new(5),
            today + Days::new(10),
            today + Days::new(40),
            today + Days::new(45),
        ],
    )
    .await;

    let response = router(pool)
        .oneshot(
            Request::get("/api/round/current")
                .header("authorization", format!("Bearer {SECRET}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["phase"], "signups");
    assert_eq!(body["round_id"], 1);
    assert_eq!(body["song_assigned"], false);
    // Labels carry the formatted window bounds; the schedule carries the
    // raw dates
    assert!(body["labels"]["signups"]["opens"].is_string());
    assert_eq!(
        body["schedule"]["signups"]["opens"],
        (today - Days::new(10)).to_string()
    );
    assert!(body["schedule"]["celebration"]["closes"].is_string());
}

#[tokio::test]
async fn assignment_endpoint_commits_the_winner_during_covering() {
    let pool = seeded_pool().await;
    let today = Utc::now().date_naive();
    insert_round(
        &pool,
        [
            today - Days::new(30),
            today - Days::new(20),
            today - Days::new(5),
            today + Days::new(10),
            today + Days::new(15),
        ],
    )
    .await;

    sqlx::query("INSERT INTO users (id, email) VALUES ('u1', 'u1@example.com')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO songs (id, title, artist) VALUES (5, 'Dreams', 'Fleetwood Mac')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO song_selection_votes (round_id, song_id, user_id, vote) VALUES (1, 5, 'u1', 5)")
        .execute(&pool)
        .await
        .unwrap();

    let app = router(pool.clone());
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/cron/assign-round-song")
                .header("authorization", format!("Bearer {SECRET}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["outcome"]["action"], "assigned");
    assert_eq!(body["outcome"]["song_id"], 5);

    let assigned: Option<i64> = sqlx::query_scalar("SELECT song_id FROM rounds WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(assigned, Some(5));

    // Re-running the job is a skip, not a reassignment
    let response = app
        .oneshot(
            Request::post("/api/cron/assign-round-song")
                .header("authorization", format!("Bearer {SECRET}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["outcome"]["action"], "skipped");
    assert_eq!(body["outcome"]["reason"], "already_assigned");
}
