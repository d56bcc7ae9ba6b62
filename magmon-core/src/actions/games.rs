use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::games::{initial_review_notes, sort_newest_first};
use crate::http::Transport;
use crate::model::{
    DeckVersionSummary, Game, GameStatus, MatchDetails, MatchReview, MatchStatus,
    MatchSubmission, MatchSummary, NewGame, NewRegistration, Registration,
};
use crate::storage::SessionStorage;
use crate::validation::{
    optional_text, validate_game_date, validate_placements, validate_registration_selection,
    validate_rejection_notes,
};
use crate::versions::preferred_registration_version;

/// Registrations and result of the selected game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameDetails {
    pub registrations: Vec<Registration>,
    pub match_details: Option<MatchDetails>,
    /// Prefill for the review notes box.
    pub review_notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameForm {
    pub game_date: String,
    pub is_pauper: bool,
    pub details: String,
}

/// Results form: one entry per registered player, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultForm {
    pub placements: Vec<(i64, Option<u32>)>,
    pub start_time: String,
    pub end_time: String,
    pub notes_big_interaction: String,
    pub notes_rules_discussion: String,
    pub notes_end_summary: String,
}

impl ResultForm {
    /// Blank form for the given registrations.
    #[must_use]
    pub fn for_registrations(registrations: &[Registration]) -> Self {
        Self {
            placements: registrations.iter().map(|r| (r.user_id, None)).collect(),
            ..Self::default()
        }
    }

    pub fn set_placement(&mut self, user_id: i64, placement: Option<u32>) {
        if let Some(entry) = self.placements.iter_mut().find(|(id, _)| *id == user_id) {
            entry.1 = placement;
        }
    }

    #[must_use]
    pub fn placement_of(&self, user_id: i64) -> Option<u32> {
        self.placements
            .iter()
            .find(|(id, _)| *id == user_id)
            .and_then(|(_, p)| *p)
    }
}

/// Fresh state after a result was submitted, approved or rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub games: Vec<Game>,
    /// The refreshed selected game, if still listed.
    pub game: Option<Game>,
    pub details: Option<GameDetails>,
}

/// # Errors
///
/// Returns the request error.
pub async fn load_games<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
) -> ApiResult<Vec<Game>> {
    let mut games = api.games(None).await?;
    sort_newest_first(&mut games);
    Ok(games)
}

/// Registrations, then the match result when the game has one.
///
/// # Errors
///
/// Returns the first failing request's error.
pub async fn load_game_details<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    game: &Game,
) -> ApiResult<GameDetails> {
    let registrations = api.registrations(game.id).await?;
    let match_details = match game.match_id {
        Some(match_id) => Some(api.match_details(match_id).await?),
        None => None,
    };
    let review_notes = match_details
        .as_ref()
        .map(initial_review_notes)
        .unwrap_or_default();
    Ok(GameDetails {
        registrations,
        match_details,
        review_notes,
    })
}

/// # Errors
///
/// The date is validated before posting; otherwise the request error.
pub async fn create_game<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    form: &GameForm,
) -> ApiResult<Vec<Game>> {
    let date = validate_game_date(&form.game_date)?;
    api.create_game(&NewGame {
        game_date: date.format("%Y-%m-%d").to_string(),
        is_pauper: form.is_pauper,
        details: form.details.trim().to_string(),
    })
    .await?;
    load_games(api).await
}

/// Versions of the deck picked for registration and the one to preselect.
///
/// # Errors
///
/// Returns the request error.
pub async fn registration_versions<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    deck_id: i64,
) -> ApiResult<(Vec<DeckVersionSummary>, Option<i64>)> {
    let versions = api.deck_versions(deck_id).await?;
    let preselect = preferred_registration_version(&versions);
    Ok((versions, preselect))
}

/// # Errors
///
/// Both selections are required; otherwise the request error.
pub async fn register_deck<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    game: &Game,
    deck_id: Option<i64>,
    version_id: Option<i64>,
) -> ApiResult<GameDetails> {
    let (deck_id, deck_version_id) = validate_registration_selection(deck_id, version_id)?;
    api.register_for_game(
        game.id,
        &NewRegistration {
            deck_id,
            deck_version_id,
        },
    )
    .await?;
    load_game_details(api, game).await
}

/// # Errors
///
/// Returns the request error.
pub async fn unregister<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    game: &Game,
) -> ApiResult<GameDetails> {
    api.unregister_from_game(game.id).await?;
    load_game_details(api, game).await
}

/// # Errors
///
/// Returns the request error.
pub async fn cancel_game<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    game_id: i64,
) -> ApiResult<Vec<Game>> {
    api.update_game_status(game_id, GameStatus::Cancelled)
        .await?;
    load_games(api).await
}

/// # Errors
///
/// Returns the request error.
pub async fn approve_result<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    game_id: i64,
    match_id: i64,
    notes: &str,
) -> ApiResult<ReviewOutcome> {
    api.approve_match(
        match_id,
        &MatchReview {
            approval_notes: optional_text(notes),
        },
    )
    .await?;
    refresh_selected(api, game_id).await
}

/// # Errors
///
/// Notes are required before anything is sent.
pub async fn reject_result<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    game_id: i64,
    match_id: i64,
    notes: &str,
) -> ApiResult<ReviewOutcome> {
    let notes = validate_rejection_notes(notes)?;
    api.reject_match(
        match_id,
        &MatchReview {
            approval_notes: Some(notes),
        },
    )
    .await?;
    refresh_selected(api, game_id).await
}

/// # Errors
///
/// Placements are validated before posting; otherwise the request error.
pub async fn submit_result<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    submitter_id: i64,
    game_id: i64,
    form: &ResultForm,
) -> ApiResult<ReviewOutcome> {
    let placements = validate_placements(&form.placements)?;
    api.submit_match(&MatchSubmission {
        submitted_by_id: submitter_id,
        game_id,
        placements,
        start_time: optional_text(&form.start_time),
        end_time: optional_text(&form.end_time),
        notes_big_interaction: optional_text(&form.notes_big_interaction),
        notes_rules_discussion: optional_text(&form.notes_rules_discussion),
        notes_end_summary: optional_text(&form.notes_end_summary),
    })
    .await?;
    refresh_selected(api, game_id).await
}

/// Results awaiting approval, for the dashboard.
///
/// # Errors
///
/// Returns the request error.
pub async fn pending_results<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
) -> ApiResult<Vec<MatchSummary>> {
    api.matches(Some(MatchStatus::Pending)).await
}

async fn refresh_selected<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    game_id: i64,
) -> ApiResult<ReviewOutcome> {
    let games = load_games(api).await?;
    let game = games.iter().find(|g| g.id == game_id).cloned();
    let details = match &game {
        Some(game) => Some(load_game_details(api, game).await?),
        None => None,
    };
    Ok(ReviewOutcome {
        games,
        game,
        details,
    })
}
