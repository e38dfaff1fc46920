//! Reminder send log queries
//!
//! The log is append-only. Its unique (round, user, type) constraint makes
//! the check-then-record atomic: under concurrent runs only one insert
//! lands, so a recipient is never double-sent.

use eptss_common::db::ReminderSentRow;
use eptss_common::Result;
use eptss_engine::{ReminderSendRecord, ReminderType};
use sqlx::SqlitePool;
use tracing::warn;

/// Fetch all prior send records for a round
///
/// Rows with an unrecognized type identifier are skipped with a warning;
/// they cannot correspond to any trigger the scheduler would fire.
pub async fn get_reminder_records(
    pool: &SqlitePool,
    round_id: i64,
) -> Result<Vec<ReminderSendRecord>> {
    let rows = sqlx::query_as::<_, ReminderSentRow>(
        "SELECT round_id, user_id, email_type, sent_at, success \
         FROM email_reminders_sent WHERE round_id = $1",
    )
    .bind(round_id)
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match ReminderType::parse(&row.email_type) {
            Some(reminder_type) => records.push(ReminderSendRecord {
                round_id: row.round_id,
                user_id: row.user_id,
                reminder_type,
                sent_at: row.sent_at.and_utc(),
                success: row.success,
            }),
            None => warn!("Unknown reminder type in send log: {}", row.email_type),
        }
    }
    Ok(records)
}

/// Record one send attempt, successful or not
///
/// Returns false when a record for the tuple already exists (a concurrent
/// run got there first); the caller treats that as "already sent".
pub async fn record_reminder_attempt(
    pool: &SqlitePool,
    round_id: i64,
    user_id: &str,
    reminder_type: ReminderType,
    success: bool,
    error_message: Option<&str>,
) -> Result<bool> {
    let result = sqlx::query(
        "INSERT INTO email_reminders_sent (round_id, user_id, email_type, success, error_message) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (round_id, user_id, email_type) DO NOTHING",
    )
    .bind(round_id)
    .bind(user_id)
    .bind(reminder_type.as_str())
    .bind(success)
    .bind(error_message)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
