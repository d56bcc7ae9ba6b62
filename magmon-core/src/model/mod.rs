//! Wire records exchanged with the MagMon REST API.

pub mod admin;
pub mod deck;
pub mod game;
pub mod matches;
pub mod user;

pub use admin::{
    AdminActionType, AdminCheck, AdminReason, AdminRef, AdminToggle, AdminUser, AuditLogEntry,
    DeletedGame, TempPassword,
};
pub use deck::{
    Deck, DeckDetail, DeckHistoryItem, DeckVersionDetail, DeckVersionSummary, NewDeck,
    NewDeckVersion,
};
pub use game::{
    Game, GameStatus, GameStatusUpdate, MatchStatus, NewGame, NewRegistration, Registration,
};
pub use matches::{
    MatchDetails, MatchPlayer, MatchReview, MatchSubmission, MatchSubmitted, MatchSummary,
    Placement,
};
pub use user::{
    AvatarUploadResponse, ChangePasswordRequest, ChangePasswordResponse, LoginRequest,
    LoginResponse, MessageResponse, OwnProfile, PlayerProfile, PlayerStats, PlayerSummary,
    ProfileUpdate, ProfileUpdateResponse, RegisterRequest, User,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_decodes_with_sparse_fields() {
        let game: Game = serde_json::from_str(
            r#"{"id":3,"game_date":"2025-03-14","status":"Upcoming","is_pauper":false,
                "details":null,"match_id":null,"match_status":null,"registration_count":2}"#,
        )
        .unwrap();
        assert_eq!(game.status, GameStatus::Upcoming);
        assert_eq!(game.registration_count, 2);
        assert!(game.winner_username.is_none());
    }

    #[test]
    fn match_status_uses_lowercase_wire_names() {
        let status: MatchStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, MatchStatus::Approved);
        assert_eq!(serde_json::to_string(&MatchStatus::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn audit_entry_decodes_action_type() {
        let entry: AuditLogEntry = serde_json::from_str(
            r#"{"id":1,"admin":{"id":2,"username":"root"},"action_type":"GAME_RESTORE",
                "previous_state":{"is_deleted":true},"new_state":{"is_deleted":false},
                "reason":"Administrative restoration","created_at":"2025-01-02T03:04:05"}"#,
        )
        .unwrap();
        assert_eq!(entry.action_type, AdminActionType::GameRestore);
        assert_eq!(entry.admin.username.as_deref(), Some("root"));
    }

    #[test]
    fn stored_user_defaults_flags() {
        let user: User = serde_json::from_str(r#"{"id":9,"username":"ana"}"#).unwrap();
        assert!(!user.is_admin);
        assert!(!user.must_change_password);
    }

    #[test]
    fn players_by_placement_orders_finishers() {
        let details: MatchDetails = serde_json::from_str(
            r#"{"match_id":1,"game_id":2,"status":"pending","submitted_by_id":3,"players":[
                {"user_id":1,"username":"a","deck_id":1,"deck_name":"A",
                 "commander":"X","placement":2},
                {"user_id":2,"username":"b","deck_id":2,"deck_name":"B",
                 "commander":"Y","placement":1}]}"#,
        )
        .unwrap();
        let order: Vec<&str> = details
            .players_by_placement()
            .iter()
            .map(|p| p.username.as_str())
            .collect();
        assert_eq!(order, ["b", "a"]);
    }
}
