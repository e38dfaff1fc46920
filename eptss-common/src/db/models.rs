//! Database row models

use eptss_engine::RoundMilestones;
use serde::{Deserialize, Serialize};

/// A round row: identifier, slug, optional assigned song, and the five
/// milestone timestamps stored as text
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoundRow {
    pub id: i64,
    pub slug: Option<String>,
    pub song_id: Option<i64>,
    pub signup_opens: String,
    pub voting_opens: String,
    pub covering_begins: String,
    pub covers_due: String,
    pub listening_party: String,
}

impl RoundRow {
    /// Parse the stored milestone columns, validating format and ordering
    pub fn milestones(&self) -> eptss_engine::Result<RoundMilestones> {
        RoundMilestones::parse(
            &self.signup_opens,
            &self.voting_opens,
            &self.covering_begins,
            &self.covers_due,
            &self.listening_party,
        )
    }

    /// Display name, preferring the slug
    pub fn display_name(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => format!("round-{}", self.id),
        }
    }

    /// Whether a winning song has been committed to this round
    pub fn has_song_assigned(&self) -> bool {
        self.song_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SongRow {
    pub id: i64,
    pub title: String,
    pub artist: String,
}

/// One vote joined with its song's identity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VoteRow {
    pub song_id: i64,
    pub title: String,
    pub artist: String,
    pub vote: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub username: Option<String>,
}

/// One row of the append-only reminder send log
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReminderSentRow {
    pub round_id: i64,
    pub user_id: String,
    pub email_type: String,
    pub sent_at: chrono::NaiveDateTime,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> RoundRow {
        RoundRow {
            id: 21,
            slug: Some("round-21".to_string()),
            song_id: None,
            signup_opens: "2022-11-17".to_string(),
            voting_opens: "2022-12-06".to_string(),
            covering_begins: "2022-12-17".to_string(),
            covers_due: "2023-01-31".to_string(),
            listening_party: "2023-02-08".to_string(),
        }
    }

    #[test]
    fn parses_milestones_from_stored_columns() {
        let milestones = round().milestones().unwrap();
        assert!(milestones.validate_order().is_ok());
    }

    #[test]
    fn malformed_column_surfaces_as_format_error() {
        let mut row = round();
        row.covers_due = "soon".to_string();
        assert_eq!(
            row.milestones(),
            Err(eptss_engine::Error::InvalidMilestoneFormat("soon".to_string()))
        );
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut row = round();
        row.slug = None;
        assert_eq!(row.display_name(), "round-21");
    }
}
