//! Error types for the round engine

use thiserror::Error;

/// Result type for round engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving a round's phase
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A milestone value could not be parsed as a timestamp
    #[error("invalid milestone format: {0:?}")]
    InvalidMilestoneFormat(String),

    /// Milestones violate the required strict ordering
    #[error("milestones are out of order")]
    MilestonesOutOfOrder,

    /// Evaluated before the signup date; signups open the round
    #[error("round has not started yet")]
    RoundNotYetStarted,

    /// Evaluated after the listening party; the listening party ends the round
    #[error("round has already ended")]
    RoundAlreadyEnded,
}
