//! The daily scheduled jobs
//!
//! Each job is one fetch-decide-commit pass: read the current round's data,
//! ask the engine for a decision, and perform the resulting writes. Both
//! are safe to re-run; the idempotence guards live in the engine's
//! decisions and in the conditional database writes.

pub mod assign;
pub mod reminders;

pub use assign::{run_assign_round_song, AssignOutcome};
pub use reminders::{run_send_reminders, ReminderRunReport, TypeReport};
