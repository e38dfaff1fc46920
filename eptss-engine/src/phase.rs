//! Phase resolution
//!
//! A round's phase is never stored; it is recomputed on every evaluation
//! from `now` and the round's milestones. The resolver is a linear four-state
//! machine with no back-transitions:
//!
//! ```text
//! signups → voting → covering → celebration
//! ```
//!
//! Comparisons happen at UTC calendar-day granularity so an evaluation at
//! 23:59 and one at 00:01 of the same day agree on the phase.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::milestones::RoundMilestones;

/// The four stages of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Signups,
    Voting,
    Covering,
    Celebration,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Signups => "signups",
            Phase::Voting => "voting",
            Phase::Covering => "covering",
            Phase::Celebration => "celebration",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the phase a round is in at `now`
///
/// Fails with `RoundNotYetStarted` before the signup day (signups open the
/// round) and `RoundAlreadyEnded` after the listening party day (the
/// listening party ends the round).
pub fn resolve_phase(now: DateTime<Utc>, milestones: &RoundMilestones) -> Result<Phase> {
    milestones.validate_order()?;

    let today = now.date_naive();
    if today < milestones.signup_day() {
        return Err(Error::RoundNotYetStarted);
    }
    if today > milestones.listening_party_day() {
        return Err(Error::RoundAlreadyEnded);
    }

    let phase = if today < milestones.voting_day() {
        Phase::Signups
    } else if today < milestones.covering_day() {
        Phase::Voting
    } else if today < milestones.covers_due_day() {
        Phase::Covering
    } else {
        Phase::Celebration
    };
    Ok(phase)
}

/// Opening and closing day of one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub opens: NaiveDate,
    pub closes: NaiveDate,
}

/// Date windows for all four phases of a round
///
/// Adjacent windows never overlap: each phase closes one day before the
/// next phase's opening milestone, and celebration closes on the listening
/// party itself. Together the windows partition the round's full span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSchedule {
    pub signups: PhaseWindow,
    pub voting: PhaseWindow,
    pub covering: PhaseWindow,
    pub celebration: PhaseWindow,
}

impl PhaseSchedule {
    pub fn window(&self, phase: Phase) -> PhaseWindow {
        match phase {
            Phase::Signups => self.signups,
            Phase::Voting => self.voting,
            Phase::Covering => self.covering,
            Phase::Celebration => self.celebration,
        }
    }
}

/// Compute the date window of every phase
pub fn phase_schedule(milestones: &RoundMilestones) -> Result<PhaseSchedule> {
    milestones.validate_order()?;

    let day_before = |day: NaiveDate| day - Days::new(1);
    Ok(PhaseSchedule {
        signups: PhaseWindow {
            opens: milestones.signup_day(),
            closes: day_before(milestones.voting_day()),
        },
        voting: PhaseWindow {
            opens: milestones.voting_day(),
            closes: day_before(milestones.covering_day()),
        },
        covering: PhaseWindow {
            opens: milestones.covering_day(),
            closes: day_before(milestones.covers_due_day()),
        },
        celebration: PhaseWindow {
            opens: milestones.covers_due_day(),
            closes: milestones.listening_party_day(),
        },
    })
}

/// Display labels for one phase's date window, e.g. "Thursday, Nov 17th"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseLabel {
    pub opens: String,
    pub closes: String,
}

/// Display labels for all four phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseLabels {
    pub signups: PhaseLabel,
    pub voting: PhaseLabel,
    pub covering: PhaseLabel,
    pub celebration: PhaseLabel,
}

impl PhaseLabels {
    pub fn label(&self, phase: Phase) -> &PhaseLabel {
        match phase {
            Phase::Signups => &self.signups,
            Phase::Voting => &self.voting,
            Phase::Covering => &self.covering,
            Phase::Celebration => &self.celebration,
        }
    }
}

/// Format display labels for every phase's date window
pub fn phase_date_labels(milestones: &RoundMilestones) -> Result<PhaseLabels> {
    let schedule = phase_schedule(milestones)?;
    let label = |window: PhaseWindow| PhaseLabel {
        opens: format_label_day(window.opens),
        closes: format_label_day(window.closes),
    };
    Ok(PhaseLabels {
        signups: label(schedule.signups),
        voting: label(schedule.voting),
        covering: label(schedule.covering),
        celebration: label(schedule.celebration),
    })
}

/// Format a date as "Thursday, Nov 17th"
fn format_label_day(day: NaiveDate) -> String {
    format!(
        "{}, {} {}{}",
        day.format("%A"),
        day.format("%b"),
        day.day(),
        ordinal_suffix(day.day())
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
