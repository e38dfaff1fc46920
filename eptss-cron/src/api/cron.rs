//! Cron job endpoints
//!
//! Invoked by an external daily scheduler. Both endpoints are idempotent:
//! the winner assignment refuses to assign twice and the reminder run
//! skips already-recorded tuples, so a retried invocation is harmless.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use crate::{jobs, AppState};

/// POST /api/cron/assign-round-song
pub async fn assign_round_song(State(state): State<AppState>) -> impl IntoResponse {
    match jobs::run_assign_round_song(&state.db, eptss_common::time::now()).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "outcome": outcome,
            })),
        ),
        Err(e) => {
            error!("assign-round-song failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                })),
            )
        }
    }
}

/// POST /api/cron/send-reminder-emails
pub async fn send_reminder_emails(State(state): State<AppState>) -> impl IntoResponse {
    match jobs::run_send_reminders(&state.db, eptss_common::time::now(), state.notifier.as_ref())
        .await
    {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "total_sent": report.total_sent(),
                "report": report,
            })),
        ),
        Err(e) => {
            error!("send-reminder-emails failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                })),
            )
        }
    }
}
