//! Round calendar milestones
//!
//! Five ordered timestamps bound the four phases of a round:
//!
//! ```text
//! signup_opens < voting_opens < covering_begins < covers_due < listening_party
//! ```
//!
//! Ordering is validated at construction time. Phase boundaries operate at
//! calendar-day granularity (UTC), so accessors expose each milestone's day
//! alongside the raw instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The five calendar milestones of a round, strictly increasing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundMilestones {
    pub signup_opens: DateTime<Utc>,
    pub voting_opens: DateTime<Utc>,
    pub covering_begins: DateTime<Utc>,
    pub covers_due: DateTime<Utc>,
    pub listening_party: DateTime<Utc>,
}

impl RoundMilestones {
    /// Build milestones, validating strict ordering
    pub fn new(
        signup_opens: DateTime<Utc>,
        voting_opens: DateTime<Utc>,
        covering_begins: DateTime<Utc>,
        covers_due: DateTime<Utc>,
        listening_party: DateTime<Utc>,
    ) -> Result<Self> {
        let milestones = Self {
            signup_opens,
            voting_opens,
            covering_begins,
            covers_due,
            listening_party,
        };
        milestones.validate_order()?;
        Ok(milestones)
    }

    /// Parse milestones from stored timestamp strings
    ///
    /// Accepts RFC 3339 (`2022-11-17T00:00:00Z`), SQL datetime
    /// (`2022-11-17 00:00:00`), or a bare date (`2022-11-17`).
    pub fn parse(
        signup_opens: &str,
        voting_opens: &str,
        covering_begins: &str,
        covers_due: &str,
        listening_party: &str,
    ) -> Result<Self> {
        Self::new(
            parse_instant(signup_opens)?,
            parse_instant(voting_opens)?,
            parse_instant(covering_begins)?,
            parse_instant(covers_due)?,
            parse_instant(listening_party)?,
        )
    }

    /// Verify `signup_opens < voting_opens < covering_begins < covers_due < listening_party`
    pub fn validate_order(&self) -> Result<()> {
        let ordered = self.signup_opens < self.voting_opens
            && self.voting_opens < self.covering_begins
            && self.covering_begins < self.covers_due
            && self.covers_due < self.listening_party;
        if ordered {
            Ok(())
        } else {
            Err(Error::MilestonesOutOfOrder)
        }
    }

    pub fn signup_day(&self) -> NaiveDate {
        self.signup_opens.date_naive()
    }

    pub fn voting_day(&self) -> NaiveDate {
        self.voting_opens.date_naive()
    }

    pub fn covering_day(&self) -> NaiveDate {
        self.covering_begins.date_naive()
    }

    pub fn covers_due_day(&self) -> NaiveDate {
        self.covers_due.date_naive()
    }

    pub fn listening_party_day(&self) -> NaiveDate {
        self.listening_party.date_naive()
    }
}

/// Parse a single milestone string into a UTC instant
fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(Error::InvalidMilestoneFormat(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RoundMilestones {
        RoundMilestones::parse(
            "2022-11-17",
            "2022-12-06",
            "2022-12-17",
            "2023-01-31",
            "2023-02-08",
        )
        .unwrap()
    }

    #[test]
    fn parses_all_supported_formats() {
        let milestones = RoundMilestones::parse(
            "2022-11-17T08:30:00Z",
            "2022-12-06 09:00:00",
            "2022-12-17",
            "2023-01-31",
            "2023-02-08",
        )
        .unwrap();
        assert_eq!(milestones.signup_day(), NaiveDate::from_ymd_opt(2022, 11, 17).unwrap());
        assert_eq!(milestones.voting_day(), NaiveDate::from_ymd_opt(2022, 12, 6).unwrap());
    }

    #[test]
    fn rejects_malformed_milestone() {
        let result = RoundMilestones::parse(
            "not-a-date",
            "2022-12-06",
            "2022-12-17",
            "2023-01-31",
            "2023-02-08",
        );
        assert_eq!(
            result,
            Err(Error::InvalidMilestoneFormat("not-a-date".to_string()))
        );
    }

    #[test]
    fn rejects_out_of_order_milestones() {
        // voting_opens after covering_begins
        let result = RoundMilestones::parse(
            "2022-11-17",
            "2022-12-20",
            "2022-12-17",
            "2023-01-31",
            "2023-02-08",
        );
        assert_eq!(result, Err(Error::MilestonesOutOfOrder));
    }

    #[test]
    fn rejects_equal_adjacent_milestones() {
        let result = RoundMilestones::parse(
            "2022-11-17",
            "2022-12-06",
            "2022-12-06",
            "2023-01-31",
            "2023-02-08",
        );
        assert_eq!(result, Err(Error::MilestonesOutOfOrder));
    }

    #[test]
    fn valid_milestones_construct() {
        let milestones = valid();
        assert!(milestones.validate_order().is_ok());
    }
}
