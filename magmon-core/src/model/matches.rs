use super::game::MatchStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPlayer {
    pub user_id: i64,
    pub username: String,
    pub deck_id: i64,
    pub deck_name: String,
    pub commander: String,
    pub placement: u32,
    #[serde(default)]
    pub deck_version_id: Option<i64>,
    #[serde(default)]
    pub version_number: Option<u32>,
    #[serde(default)]
    pub version_notes: Option<String>,
}

/// Full match record from `GET /matches/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub match_id: i64,
    pub game_id: i64,
    #[serde(default)]
    pub game_date: Option<String>,
    pub status: MatchStatus,
    #[serde(default)]
    pub player_count: u32,
    pub submitted_by_id: i64,
    #[serde(default)]
    pub submitted_by_username: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub approved_by_id: Option<i64>,
    #[serde(default)]
    pub approved_by_username: Option<String>,
    #[serde(default)]
    pub approved_at: Option<String>,
    #[serde(default)]
    pub approval_notes: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub notes_big_interaction: Option<String>,
    #[serde(default)]
    pub notes_rules_discussion: Option<String>,
    #[serde(default)]
    pub notes_end_summary: Option<String>,
    #[serde(default)]
    pub players: Vec<MatchPlayer>,
}

impl MatchDetails {
    /// Players ordered by finishing position.
    #[must_use]
    pub fn players_by_placement(&self) -> Vec<&MatchPlayer> {
        let mut players: Vec<&MatchPlayer> = self.players.iter().collect();
        players.sort_by_key(|p| p.placement);
        players
    }
}

/// Entry of `GET /matches?status=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: i64,
    pub game_id: i64,
    #[serde(default)]
    pub game_date: Option<String>,
    pub status: MatchStatus,
    #[serde(default)]
    pub player_count: u32,
    #[serde(default)]
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub user_id: i64,
    pub placement: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSubmission {
    pub submitted_by_id: i64,
    pub game_id: i64,
    pub placements: Vec<Placement>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes_big_interaction: Option<String>,
    pub notes_rules_discussion: Option<String>,
    pub notes_end_summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSubmitted {
    #[serde(default)]
    pub message: Option<String>,
    pub match_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReview {
    pub approval_notes: Option<String>,
}
