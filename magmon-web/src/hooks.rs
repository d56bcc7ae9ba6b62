//! Hooks shared by the page controllers.

use crate::components::status::Flash;
use crate::context::use_app_context;
use crate::router::Route;
use magmon_core::actions::admin;
use magmon_core::{
    DeckSnapshot, RequestSequence, VersionSwitch, load_deck_snapshot, switch_version,
};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

/// A page's request sequence, retired when the page unmounts.
#[hook]
pub fn use_request_sequence() -> Rc<RequestSequence> {
    let seq = use_memo((), |()| RequestSequence::new());
    {
        let seq = Rc::clone(&seq);
        use_effect_with((), move |()| move || seq.invalidate());
    }
    seq
}

/// Ask the backend whether the session may use admin pages.
///
/// Returns `true` once confirmed; a refusal or failed check sends the user home.
#[hook]
pub fn use_admin_gate() -> bool {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let confirmed = use_state(|| false);
    {
        let api = Rc::clone(&ctx.api);
        let confirmed = confirmed.clone();
        use_effect_with((), move |()| {
            spawn_local(async move {
                if admin::confirm_admin(&api).await {
                    confirmed.set(true);
                } else if let Some(nav) = navigator {
                    log::warn!("admin check refused, leaving admin page");
                    nav.push(&Route::Home);
                }
            });
            || {}
        });
    }
    *confirmed
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckViewerState {
    pub deck_id: Option<i64>,
    pub snapshot: Option<DeckSnapshot>,
    pub loading: bool,
    pub version_loading: bool,
    pub flash: Option<Flash>,
    pub version_flash: Option<Flash>,
}

/// Viewer state once a version switch has settled on top of `base`.
#[must_use]
pub fn settle_version_switch(base: DeckViewerState, outcome: VersionSwitch) -> DeckViewerState {
    let (snapshot, version_flash) = match outcome {
        VersionSwitch::Loaded(snapshot) => (snapshot, None),
        VersionSwitch::Failed(snapshot, err) => {
            (snapshot, Some(Flash::failure("errors.version_load", &err)))
        }
    };
    DeckViewerState {
        snapshot: Some(snapshot),
        version_loading: false,
        version_flash,
        ..base
    }
}

/// Handle returned by [`use_deck_viewer`].
#[derive(Clone)]
pub struct DeckViewer {
    pub state: DeckViewerState,
    /// Open a deck, optionally aiming at one of its versions.
    pub open: Callback<(i64, Option<i64>)>,
    pub select_version: Callback<i64>,
    pub close: Callback<()>,
}

impl DeckViewer {
    #[must_use]
    pub fn is_open(&self, deck_id: i64) -> bool {
        self.state.deck_id == Some(deck_id)
    }
}

/// Load decks into a single viewer slot.
///
/// Opening a deck and switching versions share one request sequence, so a
/// slow response for an earlier deck or version is dropped once a newer
/// request has been issued.
#[hook]
pub fn use_deck_viewer() -> DeckViewer {
    let ctx = use_app_context();
    let seq = use_request_sequence();
    let state = use_state(DeckViewerState::default);

    let open = {
        let state = state.clone();
        let api = Rc::clone(&ctx.api);
        let seq = Rc::clone(&seq);
        Callback::from(move |(deck_id, target): (i64, Option<i64>)| {
            let ticket = seq.issue();
            state.set(DeckViewerState {
                deck_id: Some(deck_id),
                loading: true,
                ..DeckViewerState::default()
            });
            let state = state.clone();
            let api = Rc::clone(&api);
            let seq = Rc::clone(&seq);
            spawn_local(async move {
                let result = load_deck_snapshot(&api, deck_id, target).await;
                if !seq.is_current(ticket) {
                    log::debug!("dropping stale load of deck {deck_id}");
                    return;
                }
                let next = match result {
                    Ok(snapshot) => DeckViewerState {
                        deck_id: Some(deck_id),
                        snapshot: Some(snapshot),
                        ..DeckViewerState::default()
                    },
                    Err(err) => {
                        log::warn!("deck {deck_id} failed to load: {err}");
                        DeckViewerState {
                            deck_id: Some(deck_id),
                            flash: Some(Flash::failure("errors.deck_load", &err)),
                            ..DeckViewerState::default()
                        }
                    }
                };
                state.set(next);
            });
        })
    };

    let select_version = {
        let state = state.clone();
        let api = Rc::clone(&ctx.api);
        let seq = Rc::clone(&seq);
        let current = (*state).clone();
        Callback::from(move |version_id: i64| {
            let Some(shown) = current.snapshot.clone() else {
                return;
            };
            if shown.selected_version_id == Some(version_id) {
                return;
            }
            let ticket = seq.issue();
            let mut pending = shown.clone();
            pending.selected_version_id = Some(version_id);
            state.set(DeckViewerState {
                snapshot: Some(pending),
                version_loading: true,
                version_flash: None,
                ..current.clone()
            });
            let state = state.clone();
            let api = Rc::clone(&api);
            let seq = Rc::clone(&seq);
            let base = current.clone();
            spawn_local(async move {
                let outcome = switch_version(&api, &seq, ticket, shown, version_id).await;
                if let Some(outcome) = outcome {
                    state.set(settle_version_switch(base, outcome));
                }
            });
        })
    };

    let close = {
        let state = state.clone();
        let seq = Rc::clone(&seq);
        Callback::from(move |()| {
            seq.invalidate();
            state.set(DeckViewerState::default());
        })
    };

    DeckViewer {
        state: (*state).clone(),
        open,
        select_version,
        close,
    }
}
