use serde::{Deserialize, Serialize};

/// Deck list entry (`GET /users/{id}/decks`, `GET /decks`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    pub commander: String,
    #[serde(default)]
    pub colors: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Full deck record from `GET /decks/{id}`.
///
/// `decklist_text` is the legacy list kept on the deck itself; it is only
/// shown when the deck has no versions yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDetail {
    pub id: i64,
    pub name: String,
    pub commander: String,
    #[serde(default)]
    pub colors: String,
    #[serde(default)]
    pub decklist_text: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub current_version_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckVersionSummary {
    pub id: i64,
    pub version_number: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckVersionDetail {
    pub id: i64,
    pub version_number: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub decklist_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckHistoryItem {
    pub game_id: i64,
    pub game_date: String,
    /// `None` until a result has been recorded for the game.
    #[serde(default)]
    pub placement: Option<u32>,
    #[serde(default)]
    pub version_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDeck {
    pub name: String,
    pub commander: String,
    pub colors: String,
    pub decklist_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDeckVersion {
    pub decklist_text: String,
    pub notes: String,
}
