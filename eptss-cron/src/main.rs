//! eptss-cron - daily round maintenance service
//!
//! Hosts the scheduled jobs for the song cover contest: assigning the
//! voted winner once covering begins, and sending date-anchored reminder
//! emails. An external scheduler (GitHub Actions, system cron) POSTs the
//! job endpoints once a day with the shared bearer secret.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use eptss_common::config::{load_cron_secret, resolve_database_path};
use eptss_common::db::init_database;
use eptss_cron::notify::LogNotifier;
use eptss_cron::{build_router, AppState};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "eptss-cron", about = "EPTSS daily round maintenance service")]
struct Args {
    /// Path to the SQLite database (falls back to EPTSS_DB, the config
    /// file, then the OS default location)
    #[arg(long)]
    db: Option<String>,

    /// Address to listen on
    #[arg(long, env = "EPTSS_BIND", default_value = "127.0.0.1:5780")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting eptss-cron v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let db_path = resolve_database_path(args.db.as_deref());
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path).await?;

    let cron_secret = match load_cron_secret() {
        Ok(secret) => {
            info!("Loaded cron shared secret");
            Some(secret)
        }
        Err(e) => {
            // Start anyway; the job endpoints reject every call until the
            // secret is configured and the service is restarted
            warn!("{e}");
            None
        }
    };

    let state = AppState::new(pool, cron_secret, Arc::new(LogNotifier));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("eptss-cron listening on http://{}", args.bind);
    info!("Health check: http://{}/health", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
