//! Round queries

use chrono::NaiveDate;
use eptss_common::db::RoundRow;
use eptss_common::Result;
use sqlx::SqlitePool;

const ROUND_COLUMNS: &str = "id, slug, song_id, signup_opens, voting_opens, \
     covering_begins, covers_due, listening_party";

/// Fetch the round whose span contains `today`, if any
///
/// A round spans its signup day through its listening party day. With
/// overlapping rounds (the next round's signups open during the previous
/// round's celebration) the newest wins.
pub async fn get_current_round(pool: &SqlitePool, today: NaiveDate) -> Result<Option<RoundRow>> {
    let sql = format!(
        "SELECT {ROUND_COLUMNS} FROM rounds \
         WHERE date(signup_opens) <= date($1) AND date(listening_party) >= date($1) \
         ORDER BY id DESC LIMIT 1"
    );
    let round = sqlx::query_as::<_, RoundRow>(&sql)
        .bind(today.to_string())
        .fetch_optional(pool)
        .await?;
    Ok(round)
}

/// Fetch one round by id
pub async fn get_round(pool: &SqlitePool, round_id: i64) -> Result<Option<RoundRow>> {
    let sql = format!("SELECT {ROUND_COLUMNS} FROM rounds WHERE id = $1");
    let round = sqlx::query_as::<_, RoundRow>(&sql)
        .bind(round_id)
        .fetch_optional(pool)
        .await?;
    Ok(round)
}

/// Commit the winning song to a round, once
///
/// Conditional compare-and-set: only succeeds while `song_id` is still
/// NULL, so concurrent runs cannot both assign. Returns whether this call
/// performed the assignment.
pub async fn assign_song_to_round(pool: &SqlitePool, round_id: i64, song_id: i64) -> Result<bool> {
    let result = sqlx::query("UPDATE rounds SET song_id = $1 WHERE id = $2 AND song_id IS NULL")
        .bind(song_id)
        .bind(round_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}
