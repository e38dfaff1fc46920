//! Database access layer for eptss-cron
//!
//! Thin queries that fetch engine inputs (milestones, votes, signups,
//! prior reminder records) and commit engine outputs (the one-time song
//! assignment, reminder attempt records).

pub mod participants;
pub mod reminders;
pub mod rounds;
pub mod votes;

#[cfg(test)]
pub mod test_support;

pub use participants::{get_signed_up_user_ids, get_submitted_user_ids, get_user};
pub use reminders::{get_reminder_records, record_reminder_attempt};
pub use rounds::{assign_song_to_round, get_current_round, get_round};
pub use votes::get_vote_observations;
