use crate::client::ApiClient;
use crate::colors::ColorSet;
use crate::error::ApiResult;
use crate::http::Transport;
use crate::model::{
    Deck, DeckDetail, DeckVersionDetail, DeckVersionSummary, NewDeck, NewDeckVersion,
    PlayerProfile,
};
use crate::storage::SessionStorage;
use crate::validation::validate_new_deck;
use crate::versions::{DeckSnapshot, load_deck_snapshot};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckForm {
    pub name: String,
    pub commander: String,
    pub colors: ColorSet,
    pub decklist_text: String,
}

/// Create a deck for `owner_id` and return the refreshed deck list.
///
/// # Errors
///
/// Validation runs first; nothing is posted for an invalid form.
pub async fn create_deck<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    owner_id: i64,
    form: &DeckForm,
) -> ApiResult<Vec<Deck>> {
    validate_new_deck(&form.name, &form.commander, form.colors)?;
    api.create_deck(&NewDeck {
        name: form.name.trim().to_string(),
        commander: form.commander.trim().to_string(),
        colors: form.colors.to_code(),
        decklist_text: form.decklist_text.clone(),
    })
    .await?;
    api.user_decks(owner_id).await
}

/// Save an edited decklist as the deck's new current version.
///
/// # Errors
///
/// Returns the request error.
pub async fn create_version<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    deck_id: i64,
    decklist_text: &str,
    notes: &str,
) -> ApiResult<()> {
    api.create_deck_version(
        deck_id,
        &NewDeckVersion {
            decklist_text: decklist_text.to_string(),
            notes: notes.trim().to_string(),
        },
    )
    .await?;
    log::info!("created a new version for deck {deck_id}");
    Ok(())
}

/// Latest decklist, used to prefill the edit dialog.
///
/// # Errors
///
/// Returns the request error.
pub async fn current_decklist<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    deck_id: i64,
) -> ApiResult<String> {
    let deck = api.deck(deck_id).await?;
    Ok(deck.decklist_text.unwrap_or_default())
}

/// Deck header and version table, fetched in that order.
///
/// # Errors
///
/// Returns the first failing request's error.
pub async fn load_version_table<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    deck_id: i64,
) -> ApiResult<(DeckDetail, Vec<DeckVersionSummary>)> {
    let deck = api.deck(deck_id).await?;
    let versions = api.deck_versions(deck_id).await?;
    Ok((deck, versions))
}

/// Deck header and one version's content.
///
/// # Errors
///
/// Returns the first failing request's error.
pub async fn load_version_page<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    deck_id: i64,
    version_id: i64,
) -> ApiResult<(DeckDetail, DeckVersionDetail)> {
    futures::try_join!(api.deck(deck_id), api.deck_version(deck_id, version_id))
}

/// Deck view plus its owner's public profile.
///
/// A failed owner lookup leaves the owner unset instead of failing the view.
///
/// # Errors
///
/// Returns the deck load's error.
pub async fn load_deck_page<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    deck_id: i64,
    target_version: Option<i64>,
) -> ApiResult<(DeckSnapshot, Option<PlayerProfile>)> {
    let snapshot = load_deck_snapshot(api, deck_id, target_version).await?;
    let owner = match api.user(snapshot.deck.user_id).await {
        Ok(owner) => Some(owner),
        Err(err) => {
            log::warn!("could not fetch owner of deck {deck_id}: {err}");
            None
        }
    };
    Ok((snapshot, owner))
}
