//! Database initialization
//!
//! Creates the SQLite schema on first run. All statements are
//! `CREATE TABLE IF NOT EXISTS`, so initialization is idempotent and safe
//! to run at every service startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    init_schema(&pool).await?;
    Ok(pool)
}

/// Create all tables on an existing pool
///
/// Split out from [`init_database`] so tests can run against
/// `sqlite::memory:` pools.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL allows the daily job and request-time readers to coexist
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    create_users_table(pool).await?;
    create_songs_table(pool).await?;
    create_rounds_table(pool).await?;
    create_votes_table(pool).await?;
    create_signups_table(pool).await?;
    create_submissions_table(pool).await?;
    create_reminders_sent_table(pool).await?;

    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            username TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (title, artist)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the rounds table
///
/// The five milestone columns bound the round's phases. `song_id` is NULL
/// until the winner is assigned; the one-time assignment is a conditional
/// update that only succeeds while it is still NULL.
async fn create_rounds_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rounds (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT UNIQUE,
            song_id INTEGER REFERENCES songs(id),
            signup_opens TIMESTAMP NOT NULL,
            voting_opens TIMESTAMP NOT NULL,
            covering_begins TIMESTAMP NOT NULL,
            covers_due TIMESTAMP NOT NULL,
            listening_party TIMESTAMP NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the song selection votes table
///
/// One vote per (round, song, user); a resubmission replaces the previous
/// value via the unique constraint.
async fn create_votes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS song_selection_votes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            round_id INTEGER NOT NULL REFERENCES rounds(id),
            song_id INTEGER NOT NULL REFERENCES songs(id),
            user_id TEXT NOT NULL REFERENCES users(id),
            vote INTEGER NOT NULL CHECK (vote BETWEEN 1 AND 5),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (round_id, song_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_signups_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sign_ups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            round_id INTEGER NOT NULL REFERENCES rounds(id),
            user_id TEXT NOT NULL REFERENCES users(id),
            song_id INTEGER REFERENCES songs(id),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (round_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_submissions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS submissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            round_id INTEGER NOT NULL REFERENCES rounds(id),
            user_id TEXT NOT NULL REFERENCES users(id),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the reminder send log
///
/// Append-only. The unique constraint makes the check-then-record for a
/// (round, user, type) tuple atomic: concurrent senders cannot both insert,
/// so a recipient is never double-sent.
async fn create_reminders_sent_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS email_reminders_sent (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            round_id INTEGER NOT NULL REFERENCES rounds(id),
            user_id TEXT NOT NULL REFERENCES users(id),
            email_type TEXT NOT NULL,
            sent_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            success INTEGER NOT NULL DEFAULT 1,
            error_message TEXT,
            UNIQUE (round_id, user_id, email_type)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
