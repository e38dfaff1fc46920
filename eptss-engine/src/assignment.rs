//! Winner resolution trigger
//!
//! Decides whether the top-ranked song should be committed as a round's
//! song. The decision is side-effect-free: committing the assignment (and
//! notifying anyone) belongs to the caller. Re-running the decision after a
//! failed commit re-derives the same `Assign` outcome; once the commit
//! lands, `has_existing_assignment` flips every later run to `Skip`.

use serde::{Deserialize, Serialize};

use crate::phase::Phase;
use crate::tally::SongTally;

/// Why an assignment run did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotYetCovering,
    AlreadyAssigned,
    NoVotes,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SkipReason::NotYetCovering => "not yet in covering phase",
            SkipReason::AlreadyAssigned => "already assigned",
            SkipReason::NoVotes => "no votes found",
        };
        f.write_str(reason)
    }
}

/// Outcome of one winner-assignment evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssignmentDecision {
    Skip { reason: SkipReason },
    Assign { song_id: i64, winner: SongTally },
}

/// Decide whether the ranking's top song should be assigned to the round
///
/// Rules in order, first match wins:
/// 1. Not in covering phase → skip (no pre-assignment during voting, no
///    reassignment during celebration)
/// 2. Already assigned → skip (idempotence guard; the trigger runs daily)
/// 3. No votes → skip
/// 4. Otherwise assign the top-ranked song
pub fn decide_assignment(
    phase: Phase,
    has_existing_assignment: bool,
    ranked_tallies: &[SongTally],
) -> AssignmentDecision {
    if phase != Phase::Covering {
        return AssignmentDecision::Skip {
            reason: SkipReason::NotYetCovering,
        };
    }
    if has_existing_assignment {
        return AssignmentDecision::Skip {
            reason: SkipReason::AlreadyAssigned,
        };
    }
    match ranked_tallies.first() {
        None => AssignmentDecision::Skip {
            reason: SkipReason::NoVotes,
        },
        Some(winner) => AssignmentDecision::Assign {
            song_id: winner.song_id,
            winner: winner.clone(),
        },
    }
}
