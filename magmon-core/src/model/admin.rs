use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCheck {
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub must_change_password: bool,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempPassword {
    pub temp_password: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminToggle {
    #[serde(default)]
    pub message: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedGame {
    pub id: i64,
    pub game_date: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub deleted_by: Option<AdminRef>,
    #[serde(default)]
    pub last_admin_action: Option<String>,
    #[serde(default)]
    pub last_admin_action_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminActionType {
    GameDelete,
    GameRestore,
    MatchUnapprove,
    MatchUnsubmit,
}

impl AdminActionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GameDelete => "GAME_DELETE",
            Self::GameRestore => "GAME_RESTORE",
            Self::MatchUnapprove => "MATCH_UNAPPROVE",
            Self::MatchUnsubmit => "MATCH_UNSUBMIT",
        }
    }
}

impl fmt::Display for AdminActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,
    pub admin: AdminRef,
    pub action_type: AdminActionType,
    #[serde(default)]
    pub previous_state: Option<Value>,
    #[serde(default)]
    pub new_state: Option<Value>,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminReason {
    pub reason: String,
}
