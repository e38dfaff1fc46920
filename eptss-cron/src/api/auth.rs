//! Bearer-token authorization for the cron endpoints
//!
//! The daily jobs are invoked by an external scheduler that presents a
//! shared secret via `Authorization: Bearer <secret>`. A missing or
//! mismatched header rejects the invocation before any engine code runs.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::AppState;

/// Authorization middleware for protected routes
///
/// Returns 500 when no secret is configured (the scheduler cannot be
/// authorized at all) and 401 on a missing or wrong bearer token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let expected = match &state.cron_secret {
        Some(secret) => secret,
        None => {
            warn!("CRON_SECRET not configured; rejecting request");
            return Err(AuthError::NotConfigured);
        }
    };

    let provided = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(header) if header == format!("Bearer {expected}") => Ok(next.run(request).await),
        _ => {
            warn!("Unauthorized request attempt on {}", request.uri().path());
            Err(AuthError::Unauthorized)
        }
    }
}

/// Authorization error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    NotConfigured,
    Unauthorized,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::NotConfigured => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
            }
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
