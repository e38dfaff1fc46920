//! Winner assignment job
//!
//! Runs once daily. Fetches the current round and its votes, asks the
//! engine whether the top-ranked song should be assigned, and commits the
//! assignment through a conditional update. The update re-checks "no song
//! assigned yet" at commit time, so two racing runs cannot both assign.

use chrono::{DateTime, Utc};
use eptss_common::Result;
use eptss_engine::{aggregate, decide_assignment, resolve_phase, AssignmentDecision, SkipReason};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db;

/// Outcome of one assignment run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AssignOutcome {
    NoCurrentRound,
    Skipped {
        round: String,
        reason: SkipReason,
    },
    Assigned {
        round: String,
        song_id: i64,
        title: String,
        artist: String,
    },
}

/// Execute the assignment pass for `now`
pub async fn run_assign_round_song(pool: &SqlitePool, now: DateTime<Utc>) -> Result<AssignOutcome> {
    let Some(round) = db::get_current_round(pool, now.date_naive()).await? else {
        info!("No current round found");
        return Ok(AssignOutcome::NoCurrentRound);
    };
    let round_name = round.display_name();

    let milestones = round.milestones()?;
    let phase = resolve_phase(now, &milestones)?;

    let observations = db::get_vote_observations(pool, round.id).await?;
    let ranked = aggregate(&observations);

    match decide_assignment(phase, round.has_song_assigned(), &ranked) {
        AssignmentDecision::Skip { reason } => {
            info!("Round {round_name}: skipping assignment ({reason})");
            Ok(AssignOutcome::Skipped {
                round: round_name,
                reason,
            })
        }
        AssignmentDecision::Assign { song_id, winner } => {
            for (rank, tally) in ranked.iter().enumerate() {
                info!(
                    "Round {round_name} ranking #{}: {} - {} (avg: {:.2}, votes: {}, one-star: {})",
                    rank + 1,
                    tally.title,
                    tally.artist,
                    tally.average,
                    tally.vote_count,
                    tally.one_star_count
                );
            }

            let committed = db::assign_song_to_round(pool, round.id, song_id).await?;
            if committed {
                info!(
                    "Round {round_name}: assigned winning song {} - {}",
                    winner.title, winner.artist
                );
                Ok(AssignOutcome::Assigned {
                    round: round_name,
                    song_id,
                    title: winner.title,
                    artist: winner.artist,
                })
            } else {
                // A concurrent run committed between our read and the update
                warn!("Round {round_name}: song was assigned by a concurrent run");
                Ok(AssignOutcome::Skipped {
                    round: round_name,
                    reason: SkipReason::AlreadyAssigned,
                })
            }
        }
    }
}
