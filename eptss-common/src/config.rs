//! Configuration loading and database path resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Database path resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `EPTSS_DB` environment variable
/// 3. `database_path` key in the TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("EPTSS_DB") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(db_path) = config.get("database_path").and_then(|v| v.as_str()) {
                    return PathBuf::from(db_path);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_database_path()
}

/// Load the cron shared secret from the `CRON_SECRET` environment variable
///
/// The daily job endpoints refuse to run without it; there is no default.
pub fn load_cron_secret() -> Result<String> {
    match std::env::var("CRON_SECRET") {
        Ok(secret) if !secret.is_empty() => Ok(secret),
        _ => Err(Error::Config(
            "CRON_SECRET is not set; cron endpoints cannot be authorized".to_string(),
        )),
    }
}

/// Locate the configuration file for the platform
fn locate_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("eptss").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/eptss/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("eptss"))
        .unwrap_or_else(|| PathBuf::from("/var/lib/eptss"))
        .join("eptss.db")
}
