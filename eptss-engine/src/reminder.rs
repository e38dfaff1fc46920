//! Reminder scheduling
//!
//! Five named triggers, each anchored to a single calendar day derived from
//! the round's milestones. Evaluation is daily-cron shaped: `due_reminders`
//! answers "is today exactly the trigger day", not a range check, so each
//! trigger fires on exactly one day per round.
//!
//! Per-recipient idempotence: any existing send record for a
//! (round, user, type) tuple exhausts the attempt, whether or not the send
//! succeeded. Failed deliveries are remediated manually, never retried
//! automatically.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::milestones::RoundMilestones;

/// A named, date-anchored reminder trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    VotingClosesTomorrow,
    CoveringHalfway,
    CoveringOneMonthLeft,
    CoveringLastWeek,
    CoversDueTomorrow,
}

impl ReminderType {
    /// All reminder types, in calendar order for a typical round
    pub const ALL: [ReminderType; 5] = [
        ReminderType::VotingClosesTomorrow,
        ReminderType::CoveringHalfway,
        ReminderType::CoveringOneMonthLeft,
        ReminderType::CoveringLastWeek,
        ReminderType::CoversDueTomorrow,
    ];

    /// Stable identifier used in the send log
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderType::VotingClosesTomorrow => "voting_closes_tomorrow",
            ReminderType::CoveringHalfway => "covering_halfway",
            ReminderType::CoveringOneMonthLeft => "covering_one_month_left",
            ReminderType::CoveringLastWeek => "covering_last_week",
            ReminderType::CoversDueTomorrow => "covers_due_tomorrow",
        }
    }

    /// Parse a stored identifier back into a reminder type
    pub fn parse(raw: &str) -> Option<ReminderType> {
        ReminderType::ALL.into_iter().find(|ty| ty.as_str() == raw)
    }

    /// The single calendar day this trigger fires on
    pub fn anchor_day(&self, milestones: &RoundMilestones) -> NaiveDate {
        let covering = milestones.covering_day();
        let due = milestones.covers_due_day();
        match self {
            ReminderType::VotingClosesTomorrow => covering - Days::new(1),
            ReminderType::CoveringHalfway => {
                let half = (due - covering).num_days() / 2;
                covering + Days::new(half as u64)
            }
            ReminderType::CoveringOneMonthLeft => due - Days::new(30),
            ReminderType::CoveringLastWeek => due - Days::new(7),
            ReminderType::CoversDueTomorrow => due - Days::new(1),
        }
    }

    /// Whether the notifier should distinguish recipients who already
    /// submitted a cover (courtesy variant for the deadline nudges)
    pub fn distinguishes_submitters(&self) -> bool {
        matches!(
            self,
            ReminderType::CoveringOneMonthLeft
                | ReminderType::CoveringLastWeek
                | ReminderType::CoversDueTomorrow
        )
    }
}

impl std::fmt::Display for ReminderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded send attempt; append-only, consulted for idempotence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderSendRecord {
    pub round_id: i64,
    pub user_id: String,
    pub reminder_type: ReminderType,
    pub sent_at: DateTime<Utc>,
    pub success: bool,
}

/// Reminder types whose anchor day is `now`'s calendar day
pub fn due_reminders(now: DateTime<Utc>, milestones: &RoundMilestones) -> Vec<ReminderType> {
    let today = now.date_naive();
    ReminderType::ALL
        .into_iter()
        .filter(|ty| ty.anchor_day(milestones) == today)
        .collect()
}

/// Whether a reminder should go to this recipient
///
/// False as soon as any record exists for the (round, user, type) tuple.
/// The success flag is deliberately ignored: one attempt, ever.
pub fn should_send(
    round_id: i64,
    user_id: &str,
    reminder_type: ReminderType,
    prior_records: &[ReminderSendRecord],
) -> bool {
    !prior_records.iter().any(|record| {
        record.round_id == round_id
            && record.user_id == user_id
            && record.reminder_type == reminder_type
    })
}
