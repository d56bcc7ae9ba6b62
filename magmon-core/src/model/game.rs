use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl GameStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match lifecycle as reported alongside games and matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Approved,
}

impl MatchStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

/// Game list entry from `GET /games`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    /// ISO calendar date (`YYYY-MM-DD`).
    pub game_date: String,
    pub status: GameStatus,
    #[serde(default)]
    pub is_pauper: bool,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub match_id: Option<i64>,
    #[serde(default)]
    pub match_status: Option<MatchStatus>,
    #[serde(default)]
    pub submitted_by_id: Option<i64>,
    #[serde(default)]
    pub registration_count: u32,
    #[serde(default)]
    pub winner_id: Option<i64>,
    #[serde(default)]
    pub winner_username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    pub game_date: String,
    pub is_pauper: bool,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatusUpdate {
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub registration_id: i64,
    pub user_id: i64,
    pub username: String,
    pub deck_id: i64,
    pub deck_name: String,
    pub commander: String,
    #[serde(default)]
    pub colors: String,
    #[serde(default)]
    pub deck_version_id: Option<i64>,
    #[serde(default)]
    pub version_number: Option<u32>,
    #[serde(default)]
    pub version_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegistration {
    pub deck_id: i64,
    pub deck_version_id: i64,
}
