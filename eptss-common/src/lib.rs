//! # EPTSS Common Library
//!
//! Shared code for the EPTSS services including:
//! - Database schema and row models
//! - Configuration loading
//! - Common error types
//! - Timestamp utilities

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
