//! Game list rules: display status, ordering and review eligibility.

use crate::model::{Game, GameStatus, MatchDetails, MatchStatus, Registration};
use chrono::NaiveDate;
use std::fmt;

/// Minimum number of registered players for a results submission.
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    PendingApproval,
    Approved,
    /// Upcoming and scheduled for today.
    Current,
    /// Upcoming, date has passed, no results yet.
    PendingSubmission,
    Scheduled(GameStatus),
}

impl DisplayStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingApproval => "Pending Approval",
            Self::Approved => "Approved",
            Self::Current => "Current",
            Self::PendingSubmission => "Pending Submission",
            Self::Scheduled(status) => status.as_str(),
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[must_use]
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Status shown for a game relative to `today`.
#[must_use]
pub fn display_status(game: &Game, today: NaiveDate) -> DisplayStatus {
    match game.match_status {
        Some(MatchStatus::Pending) => return DisplayStatus::PendingApproval,
        Some(MatchStatus::Approved) => return DisplayStatus::Approved,
        None => {}
    }
    if game.status == GameStatus::Upcoming
        && let Some(date) = parse_game_date(&game.game_date)
    {
        if date == today {
            return DisplayStatus::Current;
        }
        if date < today {
            return DisplayStatus::PendingSubmission;
        }
    }
    DisplayStatus::Scheduled(game.status)
}

/// Newest game first; unparseable dates sink to the end.
pub fn sort_newest_first(games: &mut [Game]) {
    games.sort_by(|a, b| {
        parse_game_date(&b.game_date)
            .cmp(&parse_game_date(&a.game_date))
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[must_use]
pub fn is_registered(registrations: &[Registration], user_id: i64) -> bool {
    registrations.iter().any(|r| r.user_id == user_id)
}

/// Only someone other than the submitter may approve or reject a pending result.
#[must_use]
pub fn can_review(details: &MatchDetails, user_id: i64) -> bool {
    details.status == MatchStatus::Pending && details.submitted_by_id != user_id
}

/// Notes to prefill in the review box: prior rejection notes on a pending
/// result, or the approval notes of an approved one.
#[must_use]
pub fn initial_review_notes(details: &MatchDetails) -> String {
    match (details.status, details.approval_notes.as_deref()) {
        (MatchStatus::Pending, Some(notes)) if notes.starts_with("Rejected by") => {
            notes.to_string()
        }
        (MatchStatus::Approved, Some(notes)) => notes.to_string(),
        _ => String::new(),
    }
}

/// Placement choices `1..=n` for `n` registered players.
#[must_use]
pub fn placement_options(player_count: usize) -> Vec<u32> {
    (1..=u32::try_from(player_count).unwrap_or(u32::MAX)).collect()
}

/// How many more registrations a results submission needs.
#[must_use]
pub const fn players_needed(registered: usize) -> usize {
    MIN_PLAYERS.saturating_sub(registered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: i64, date: &str, status: GameStatus, match_status: Option<MatchStatus>) -> Game {
        Game {
            id,
            game_date: date.to_string(),
            status,
            is_pauper: false,
            details: None,
            match_id: match_status.map(|_| 100 + id),
            match_status,
            submitted_by_id: None,
            registration_count: 0,
            winner_id: None,
            winner_username: None,
        }
    }

    fn day(raw: &str) -> NaiveDate {
        parse_game_date(raw).unwrap()
    }

    #[test]
    fn match_status_takes_precedence() {
        let today = day("2025-03-14");
        let g = game(1, "2025-03-14", GameStatus::Upcoming, Some(MatchStatus::Pending));
        assert_eq!(display_status(&g, today).label(), "Pending Approval");
        let g = game(1, "2025-03-01", GameStatus::Completed, Some(MatchStatus::Approved));
        assert_eq!(display_status(&g, today).label(), "Approved");
    }

    #[test]
    fn upcoming_games_relative_to_today() {
        let today = day("2025-03-14");
        let g = game(1, "2025-03-14", GameStatus::Upcoming, None);
        assert_eq!(display_status(&g, today), DisplayStatus::Current);
        let g = game(1, "2025-03-13", GameStatus::Upcoming, None);
        assert_eq!(display_status(&g, today).label(), "Pending Submission");
        let g = game(1, "2025-03-20", GameStatus::Upcoming, None);
        assert_eq!(display_status(&g, today).label(), "Upcoming");
        let g = game(1, "2025-03-01", GameStatus::Cancelled, None);
        assert_eq!(display_status(&g, today).label(), "Cancelled");
    }

    #[test]
    fn newest_first_ordering() {
        let mut games = vec![
            game(1, "2025-01-02", GameStatus::Completed, None),
            game(2, "2025-03-01", GameStatus::Upcoming, None),
            game(3, "2024-12-31", GameStatus::Completed, None),
        ];
        sort_newest_first(&mut games);
        let ids: Vec<i64> = games.iter().map(|g| g.id).collect();
        assert_eq!(ids, [2, 1, 3]);
    }

    #[test]
    fn placement_choices_and_needed_players() {
        assert_eq!(placement_options(3), [1, 2, 3]);
        assert!(placement_options(0).is_empty());
        assert_eq!(players_needed(0), 2);
        assert_eq!(players_needed(1), 1);
        assert_eq!(players_needed(4), 0);
    }
}
