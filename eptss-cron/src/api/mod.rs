//! HTTP API handlers for eptss-cron

pub mod auth;
pub mod cron;
pub mod health;
pub mod round;

pub use auth::auth_middleware;
pub use cron::{assign_round_song, send_reminder_emails};
pub use health::health_routes;
pub use round::current_round;
