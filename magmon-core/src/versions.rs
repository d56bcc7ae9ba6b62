//! Deck version resolution shared by every deck view.
//!
//! A view loads the deck, its versions and its game history together, picks
//! the version to show, then fetches that version's list. Changing the
//! selection later only repeats the last step.

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::http::Transport;
use crate::model::{DeckDetail, DeckHistoryItem, DeckVersionDetail, DeckVersionSummary};
use crate::storage::SessionStorage;
use std::cell::Cell;

/// Pick the version a freshly opened deck view should display.
///
/// Order: the requested `target` when it exists in `versions`, then the
/// deck's `current_id`, then the newest listed version. `None` only for a
/// deck without versions.
#[must_use]
pub fn resolve_initial_version(
    target: Option<i64>,
    versions: &[DeckVersionSummary],
    current_id: Option<i64>,
) -> Option<i64> {
    target
        .filter(|id| versions.iter().any(|v| v.id == *id))
        .or(current_id)
        .or_else(|| versions.first().map(|v| v.id))
}

/// Version preselected when registering a deck for a game.
#[must_use]
pub fn preferred_registration_version(versions: &[DeckVersionSummary]) -> Option<i64> {
    versions
        .iter()
        .find(|v| v.is_current)
        .or_else(|| versions.first())
        .map(|v| v.id)
}

/// What the version panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionView {
    pub version_id: Option<i64>,
    pub version_number: u32,
    pub created_at: Option<String>,
    pub notes: Option<String>,
    pub decklist_text: Option<String>,
    pub is_current: bool,
    /// Synthesized for a deck that has no versions yet.
    pub is_placeholder: bool,
}

impl VersionView {
    #[must_use]
    pub fn from_detail(detail: DeckVersionDetail) -> Self {
        Self {
            version_id: Some(detail.id),
            version_number: detail.version_number,
            created_at: detail.created_at,
            notes: detail.notes,
            decklist_text: detail.decklist_text,
            is_current: detail.is_current,
            is_placeholder: false,
        }
    }

    /// Stand-in built from the deck's legacy decklist.
    #[must_use]
    pub fn placeholder(deck: &DeckDetail) -> Self {
        Self {
            version_id: None,
            version_number: 0,
            created_at: deck.created_at.clone(),
            notes: None,
            decklist_text: deck.decklist_text.clone().filter(|t| !t.trim().is_empty()),
            is_current: false,
            is_placeholder: true,
        }
    }
}

/// Everything a deck view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSnapshot {
    pub deck: DeckDetail,
    pub versions: Vec<DeckVersionSummary>,
    pub history: Vec<DeckHistoryItem>,
    pub selected_version_id: Option<i64>,
    pub version: VersionView,
}

impl DeckSnapshot {
    #[must_use]
    pub fn has_versions(&self) -> bool {
        !self.versions.is_empty()
    }

    #[must_use]
    pub fn with_version(mut self, version: VersionView) -> Self {
        self.selected_version_id = version.version_id;
        self.version = version;
        self
    }
}

/// Load a deck view, honoring an optional `target` version.
///
/// The three base fetches run concurrently and fail together; the version
/// content fetch only starts once they have all succeeded.
///
/// # Errors
///
/// Returns the first failing request's error.
pub async fn load_deck_snapshot<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    deck_id: i64,
    target: Option<i64>,
) -> ApiResult<DeckSnapshot> {
    let (deck, versions, history) = futures::try_join!(
        api.deck(deck_id),
        api.deck_versions(deck_id),
        api.deck_history(deck_id),
    )?;

    let selected = resolve_initial_version(target, &versions, deck.current_version_id);
    log::debug!("deck {deck_id}: resolved version {selected:?} (target {target:?})");
    let version = match selected {
        Some(version_id) => VersionView::from_detail(api.deck_version(deck_id, version_id).await?),
        None => VersionView::placeholder(&deck),
    };

    Ok(DeckSnapshot {
        deck,
        versions,
        history,
        selected_version_id: selected,
        version,
    })
}

/// Fetch one version for the selector.
///
/// # Errors
///
/// Returns the request error.
pub async fn load_version<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    deck_id: i64,
    version_id: i64,
) -> ApiResult<VersionView> {
    api.deck_version(deck_id, version_id)
        .await
        .map(VersionView::from_detail)
}

/// Settled selector change for a loaded deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSwitch {
    /// The requested version is now shown and selected.
    Loaded(DeckSnapshot),
    /// The fetch failed; the selection stays on the version still shown.
    Failed(DeckSnapshot, ApiError),
}

/// Fetch `version_id` for the deck in `shown`, under `ticket`.
///
/// `shown` is the snapshot as displayed before the change. Returns `None`
/// when a newer load was issued on `seq` while this one was in flight, so the
/// caller leaves its state alone.
pub async fn switch_version<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    seq: &RequestSequence,
    ticket: Ticket,
    shown: DeckSnapshot,
    version_id: i64,
) -> Option<VersionSwitch> {
    let deck_id = shown.deck.id;
    let result = load_version(api, deck_id, version_id).await;
    if !seq.is_current(ticket) {
        log::debug!("dropping stale version {version_id} of deck {deck_id}");
        return None;
    }
    Some(match result {
        Ok(view) => VersionSwitch::Loaded(shown.with_version(view)),
        Err(err) => {
            log::warn!("version {version_id} of deck {deck_id} failed to load: {err}");
            VersionSwitch::Failed(shown, err)
        }
    })
}

/// Token identifying one in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Orders overlapping loads so only the latest one may apply its result.
///
/// Every load takes a [`Ticket`]; a response is applied only while its ticket
/// is still current. [`RequestSequence::invalidate`] retires all outstanding
/// tickets, e.g. when the view unmounts.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: Cell<u64>,
}

impl RequestSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn issue(&self) -> Ticket {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        Ticket(next)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }

    pub fn invalidate(&self) {
        self.latest.set(self.latest.get().wrapping_add(1));
    }
}
