//! Shared fixtures for database tests

use eptss_common::db::init_schema;
use sqlx::SqlitePool;

/// Fresh in-memory database with the full schema
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    init_schema(&pool).await.expect("schema init");
    pool
}

pub async fn insert_round(
    pool: &SqlitePool,
    id: i64,
    signup_opens: &str,
    voting_opens: &str,
    covering_begins: &str,
    covers_due: &str,
    listening_party: &str,
) {
    sqlx::query(
        "INSERT INTO rounds (id, slug, signup_opens, voting_opens, covering_begins, covers_due, listening_party) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(id)
    .bind(format!("round-{id}"))
    .bind(signup_opens)
    .bind(voting_opens)
    .bind(covering_begins)
    .bind(covers_due)
    .bind(listening_party)
    .execute(pool)
    .await
    .expect("insert round");
}

pub async fn insert_user(pool: &SqlitePool, id: &str) {
    sqlx::query("INSERT INTO users (id, email) VALUES ($1, $2)")
        .bind(id)
        .bind(format!("{id}@example.com"))
        .execute(pool)
        .await
        .expect("insert user");
}

pub async fn insert_song(pool: &SqlitePool, id: i64, title: &str, artist: &str) {
    sqlx::query("INSERT INTO songs (id, title, artist) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(title)
        .bind(artist)
        .execute(pool)
        .await
        .expect("insert song");
}

pub async fn insert_vote(pool: &SqlitePool, round_id: i64, song_id: i64, user_id: &str, vote: i64) {
    sqlx::query(
        "INSERT INTO song_selection_votes (round_id, song_id, user_id, vote) VALUES ($1, $2, $3, $4)",
    )
    .bind(round_id)
    .bind(song_id)
    .bind(user_id)
    .bind(vote)
    .execute(pool)
    .await
    .expect("insert vote");
}

pub async fn insert_signup(pool: &SqlitePool, round_id: i64, user_id: &str) {
    sqlx::query("INSERT INTO sign_ups (round_id, user_id) VALUES ($1, $2)")
        .bind(round_id)
        .bind(user_id)
        .execute(pool)
        .await
        .expect("insert signup");
}

pub async fn insert_submission(pool: &SqlitePool, round_id: i64, user_id: &str) {
    sqlx::query("INSERT INTO submissions (round_id, user_id) VALUES ($1, $2)")
        .bind(round_id)
        .bind(user_id)
        .execute(pool)
        .await
        .expect("insert submission");
}
