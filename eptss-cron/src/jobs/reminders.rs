//! Reminder sending job
//!
//! Runs once daily. Computes which reminder types are due today, then walks
//! each type's recipients sequentially: already-recorded tuples are
//! skipped, every attempt is recorded with its success flag, and one failed
//! delivery never stops the rest of the run.

use chrono::{DateTime, Utc};
use eptss_common::Result;
use eptss_engine::{due_reminders, should_send, ReminderType};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::db;
use crate::notify::{Notifier, ReminderNotice};

/// Per-type counts for one run
#[derive(Debug, Clone, Serialize)]
pub struct TypeReport {
    pub reminder_type: ReminderType,
    pub sent: u32,
    pub failed: u32,
    pub skipped: u32,
}

/// Summary of one reminder run
#[derive(Debug, Clone, Serialize)]
pub struct ReminderRunReport {
    /// Display name of the processed round; None when no round is active
    pub round: Option<String>,
    pub due: Vec<ReminderType>,
    pub reports: Vec<TypeReport>,
}

impl ReminderRunReport {
    fn empty(round: Option<String>) -> Self {
        Self {
            round,
            due: Vec::new(),
            reports: Vec::new(),
        }
    }

    pub fn total_sent(&self) -> u32 {
        self.reports.iter().map(|r| r.sent).sum()
    }
}

/// Execute the reminder pass for `now`
pub async fn run_send_reminders(
    pool: &SqlitePool,
    now: DateTime<Utc>,
    notifier: &dyn Notifier,
) -> Result<ReminderRunReport> {
    let Some(round) = db::get_current_round(pool, now.date_naive()).await? else {
        info!("No current round found");
        return Ok(ReminderRunReport::empty(None));
    };
    let round_name = round.display_name();

    let milestones = round.milestones()?;
    let due = due_reminders(now, &milestones);
    if due.is_empty() {
        info!("Round {round_name}: no reminders due today");
        return Ok(ReminderRunReport::empty(Some(round_name)));
    }
    info!(
        "Round {round_name}: {} reminder type(s) due: {:?}",
        due.len(),
        due.iter().map(|ty| ty.as_str()).collect::<Vec<_>>()
    );

    let recipients = db::get_signed_up_user_ids(pool, round.id).await?;
    let mut reports = Vec::with_capacity(due.len());

    for reminder_type in &due {
        let report =
            send_reminders_for_type(pool, notifier, &round, *reminder_type, &recipients).await?;
        info!(
            "Round {round_name}: {} — sent {}, failed {}, skipped {}",
            reminder_type, report.sent, report.failed, report.skipped
        );
        reports.push(report);
    }

    Ok(ReminderRunReport {
        round: Some(round_name),
        due,
        reports,
    })
}

/// Walk all recipients for one due reminder type
async fn send_reminders_for_type(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    round: &eptss_common::db::RoundRow,
    reminder_type: ReminderType,
    recipients: &[String],
) -> Result<TypeReport> {
    let submitted: HashSet<String> = if reminder_type.distinguishes_submitters() {
        db::get_submitted_user_ids(pool, round.id).await?
    } else {
        HashSet::new()
    };
    let prior_records = db::get_reminder_records(pool, round.id).await?;

    let mut report = TypeReport {
        reminder_type,
        sent: 0,
        failed: 0,
        skipped: 0,
    };

    for user_id in recipients {
        if !should_send(round.id, user_id, reminder_type, &prior_records) {
            report.skipped += 1;
            continue;
        }

        let Some(user) = db::get_user(pool, user_id).await? else {
            warn!("Recipient {user_id} not found; skipping");
            report.skipped += 1;
            continue;
        };

        let notice = ReminderNotice {
            round,
            reminder_type,
            user: &user,
            has_submitted: submitted.contains(user_id),
        };

        match notifier.send(&notice) {
            Ok(()) => {
                let recorded =
                    db::record_reminder_attempt(pool, round.id, user_id, reminder_type, true, None)
                        .await?;
                if recorded {
                    report.sent += 1;
                } else {
                    // A concurrent run recorded this tuple first
                    warn!("Reminder {reminder_type} to {user_id} already recorded");
                    report.skipped += 1;
                }
            }
            Err(error) => {
                warn!("Reminder {reminder_type} to {user_id} failed: {error}");
                db::record_reminder_attempt(
                    pool,
                    round.id,
                    user_id,
                    reminder_type,
                    false,
                    Some(&error.to_string()),
                )
                .await?;
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
