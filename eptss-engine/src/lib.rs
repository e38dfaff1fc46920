//! # EPTSS Round Engine
//!
//! Pure decision logic for the round lifecycle:
//! - Phase resolution from calendar milestones (`phase`)
//! - Vote aggregation and ranking (`tally`)
//! - One-time winner assignment gating (`assignment`)
//! - Date-anchored reminder scheduling (`reminder`)
//!
//! Every function takes `now` and its data explicitly and performs no I/O.
//! Reading milestones and votes, committing assignments, and delivering
//! reminders are caller responsibilities (see `eptss-cron`).

pub mod assignment;
pub mod error;
pub mod milestones;
pub mod phase;
pub mod reminder;
pub mod tally;

pub use assignment::{decide_assignment, AssignmentDecision, SkipReason};
pub use error::{Error, Result};
pub use milestones::RoundMilestones;
pub use phase::{
    phase_date_labels, phase_schedule, resolve_phase, Phase, PhaseLabel, PhaseLabels,
    PhaseSchedule, PhaseWindow,
};
pub use reminder::{due_reminders, should_send, ReminderSendRecord, ReminderType};
pub use tally::{aggregate, SongTally, VoteObservation};
