//! Signup, submission, and user queries

use std::collections::HashSet;

use eptss_common::db::UserRow;
use eptss_common::Result;
use sqlx::SqlitePool;

/// All users signed up for a round; every reminder type targets this set
pub async fn get_signed_up_user_ids(pool: &SqlitePool, round_id: i64) -> Result<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT user_id FROM sign_ups WHERE round_id = $1 ORDER BY created_at, id",
    )
    .bind(round_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Users who already submitted a cover for the round
///
/// Deadline reminders use this to pick the courtesy variant for submitters
/// while non-submitters keep getting nudged.
pub async fn get_submitted_user_ids(pool: &SqlitePool, round_id: i64) -> Result<HashSet<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT user_id FROM submissions WHERE round_id = $1",
    )
    .bind(round_id)
    .fetch_all(pool)
    .await?;
    Ok(ids.into_iter().collect())
}

pub async fn get_user(pool: &SqlitePool, user_id: &str) -> Result<Option<UserRow>> {
    let user = sqlx::query_as::<_, UserRow>("SELECT id, email, username FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}
