//! Request-time round resolution
//!
//! Serves the current round's phase and display-label date ranges to
//! page-rendering callers. The phase is derived on every request; it is
//! never stored.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use eptss_engine::{
    phase_date_labels, phase_schedule, resolve_phase, Error as EngineError, Phase, PhaseLabels,
    PhaseSchedule,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::{db, AppState};

#[derive(Debug, Serialize)]
pub struct CurrentRoundResponse {
    pub round_id: i64,
    pub slug: Option<String>,
    pub phase: Phase,
    pub song_assigned: bool,
    pub schedule: PhaseSchedule,
    pub labels: PhaseLabels,
}

/// GET /api/round/current
///
/// 404 when no round is active today (including the temporal range errors,
/// which callers treat as "no active phase"); 500 for round configuration
/// errors such as out-of-order milestones.
pub async fn current_round(State(state): State<AppState>) -> impl IntoResponse {
    let now = eptss_common::time::now();

    let round = match db::get_current_round(&state.db, now.date_naive()).await {
        Ok(Some(round)) => round,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "no active round" })),
            )
                .into_response()
        }
        Err(e) => {
            error!("current-round query failed: {e}");
            return internal_error(e.to_string());
        }
    };

    let resolved = round.milestones().and_then(|milestones| {
        let phase = resolve_phase(now, &milestones)?;
        let schedule = phase_schedule(&milestones)?;
        let labels = phase_date_labels(&milestones)?;
        Ok((phase, schedule, labels))
    });

    match resolved {
        Ok((phase, schedule, labels)) => Json(CurrentRoundResponse {
            round_id: round.id,
            slug: round.slug.clone(),
            phase,
            song_assigned: round.has_song_assigned(),
            schedule,
            labels,
        })
        .into_response(),
        Err(EngineError::RoundNotYetStarted) | Err(EngineError::RoundAlreadyEnded) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no active round" })),
        )
            .into_response(),
        Err(e) => {
            error!("Round {} has invalid milestones: {e}", round.id);
            internal_error(e.to_string())
        }
    }
}

fn internal_error(message: String) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
