//! eptss-cron library - daily round maintenance service
//!
//! Hosts the two scheduled jobs (winner assignment and reminder sending)
//! behind bearer-token-guarded endpoints, plus a request-time endpoint that
//! resolves the current round's phase. The decisions themselves live in
//! `eptss-engine`; this crate fetches their inputs and commits their
//! outputs.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

use crate::notify::Notifier;

pub mod api;
pub mod db;
pub mod jobs;
pub mod notify;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Shared secret for cron endpoint authorization; None means the
    /// endpoints reject every invocation with a configuration error
    pub cron_secret: Option<String>,
    /// Reminder delivery seam
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(db: SqlitePool, cron_secret: Option<String>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            cron_secret,
            notifier,
        }
    }
}

/// Build application router
///
/// Cron and round endpoints require authorization; the health endpoint
/// does not.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};
    use tower::ServiceBuilder;
    use tower_http::trace::TraceLayer;

    let protected = Router::new()
        .route("/api/cron/assign-round-song", post(api::assign_round_song))
        .route("/api/cron/send-reminder-emails", post(api::send_reminder_emails))
        .route("/api/round/current", get(api::current_round))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    let public = Router::new().merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
