//! Reminder delivery seam
//!
//! The scheduler decides who gets which reminder; actually delivering it
//! (email, push, anything) is behind the [`Notifier`] trait. The default
//! implementation only logs, which keeps the daily job runnable without a
//! mail provider configured.

use eptss_common::db::{RoundRow, UserRow};
use eptss_common::Result;
use eptss_engine::ReminderType;
use tracing::info;

/// Everything a delivery backend needs to render one reminder
#[derive(Debug)]
pub struct ReminderNotice<'a> {
    pub round: &'a RoundRow,
    pub reminder_type: ReminderType,
    pub user: &'a UserRow,
    /// For deadline nudges: submitters get a courtesy variant
    pub has_submitted: bool,
}

/// Delivery backend for reminder notices
pub trait Notifier: Send + Sync {
    fn send(&self, notice: &ReminderNotice<'_>) -> Result<()>;
}

/// Logs each notice instead of delivering it
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, notice: &ReminderNotice<'_>) -> Result<()> {
        info!(
            "Reminder {} for round {} to {} (submitted: {})",
            notice.reminder_type,
            notice.round.display_name(),
            notice.user.email,
            notice.has_submitted
        );
        Ok(())
    }
}
