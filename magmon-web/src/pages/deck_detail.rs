use crate::components::avatar::Avatar;
use crate::components::deck_view::DeckView;
use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::hooks::use_request_sequence;
use crate::i18n::t;
use crate::router::{DeckFocus, Route};
use magmon_core::actions::decks;
use magmon_core::model::PlayerProfile;
use magmon_core::{DeckSnapshot, VersionSwitch, switch_version};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct OwnerBadgeProps {
    pub owner: PlayerProfile,
}

#[function_component(OwnerBadge)]
pub fn owner_badge(props: &OwnerBadgeProps) -> Html {
    let owner = &props.owner;
    html! {
        <div class="owner-badge">
            <Avatar url={owner.avatar_url.clone()} alt={AttrValue::from(owner.username.clone())} size={40} />
            <Link<Route> to={Route::PlayerDetail { user_id: owner.id }}>
                <strong>{ owner.username.clone() }</strong>
            </Link<Route>>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub deck_id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct PageState {
    snapshot: Option<DeckSnapshot>,
    owner: Option<PlayerProfile>,
    loading: bool,
    flash: Option<Flash>,
    version_loading: bool,
    version_flash: Option<Flash>,
}

impl PageState {
    /// State once a version switch started from `self` has settled.
    fn settle(self, outcome: VersionSwitch) -> Self {
        let (snapshot, version_flash) = match outcome {
            VersionSwitch::Loaded(snapshot) => (snapshot, None),
            VersionSwitch::Failed(snapshot, err) => {
                (snapshot, Some(Flash::failure("errors.version_load", &err)))
            }
        };
        Self {
            snapshot: Some(snapshot),
            version_loading: false,
            version_flash,
            ..self
        }
    }
}

#[function_component(DeckDetailPage)]
pub fn deck_detail_page(props: &Props) -> Html {
    let ctx = use_app_context();
    let seq = use_request_sequence();
    let target = use_location()
        .and_then(|l| l.state::<DeckFocus>())
        .filter(|focus| focus.deck_id.is_none_or(|id| id == props.deck_id))
        .and_then(|focus| focus.version_id);
    let state = use_state(|| PageState {
        loading: true,
        ..PageState::default()
    });

    {
        let api = Rc::clone(&ctx.api);
        let seq = Rc::clone(&seq);
        let state = state.clone();
        use_effect_with(props.deck_id, move |deck_id| {
            let deck_id = *deck_id;
            let ticket = seq.issue();
            state.set(PageState {
                loading: true,
                ..PageState::default()
            });
            spawn_local(async move {
                let result = decks::load_deck_page(&api, deck_id, target).await;
                if !seq.is_current(ticket) {
                    return;
                }
                state.set(match result {
                    Ok((snapshot, owner)) => PageState {
                        snapshot: Some(snapshot),
                        owner,
                        ..PageState::default()
                    },
                    Err(err) => PageState {
                        flash: Some(Flash::failure("errors.deck_load", &err)),
                        ..PageState::default()
                    },
                });
            });
            || {}
        });
    }

    let on_select_version = {
        let api = Rc::clone(&ctx.api);
        let seq = Rc::clone(&seq);
        let state = state.clone();
        Callback::from(move |version_id: i64| {
            let current = (*state).clone();
            let Some(snapshot) = current.snapshot.clone() else {
                return;
            };
            if snapshot.selected_version_id == Some(version_id) {
                return;
            }
            let ticket = seq.issue();
            let mut pending = snapshot.clone();
            pending.selected_version_id = Some(version_id);
            state.set(PageState {
                snapshot: Some(pending),
                version_loading: true,
                version_flash: None,
                ..current.clone()
            });
            let (api, seq, state) = (Rc::clone(&api), Rc::clone(&seq), state.clone());
            spawn_local(async move {
                let outcome = switch_version(&api, &seq, ticket, snapshot, version_id).await;
                if let Some(outcome) = outcome {
                    state.set(current.settle(outcome));
                }
            });
        })
    };

    if state.loading {
        return html! { <p aria-busy="true">{ t("decks.loading_details") }</p> };
    }
    let Some(snapshot) = state.snapshot.clone() else {
        return html! {
            <section class="deck-detail">
                <StatusLine flash={state.flash.clone().or_else(|| Some(Flash::Info(t("decks.not_found"))))} />
            </section>
        };
    };

    html! {
        <section class="deck-detail">
            <DeckView
                snapshot={snapshot}
                on_select_version={on_select_version}
                version_loading={state.version_loading}
                version_flash={state.version_flash.clone()}
            >
                if let Some(owner) = state.owner.clone() {
                    <OwnerBadge owner={owner} />
                }
            </DeckView>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;
    use yew_router::history::{AnyHistory, MemoryHistory};

    #[function_component(Harness)]
    fn harness() -> Html {
        let owner = PlayerProfile {
            id: 7,
            username: "Rhys".into(),
            avatar_url: None,
            favorite_color: None,
            retirement_plane: None,
            stats: magmon_core::model::PlayerStats::default(),
        };
        html! {
            <Router history={AnyHistory::from(MemoryHistory::new())}>
                <OwnerBadge owner={owner} />
            </Router>
        }
    }

    fn snapshot_showing(version_id: i64, selected: i64) -> DeckSnapshot {
        DeckSnapshot {
            deck: magmon_core::model::DeckDetail {
                id: 4,
                name: "Golgari Value".into(),
                commander: "Meren of Clan Nel Toth".into(),
                colors: "BG".into(),
                decklist_text: None,
                user_id: 7,
                created_at: None,
                last_updated: None,
                current_version_id: Some(1),
            },
            versions: Vec::new(),
            history: Vec::new(),
            selected_version_id: Some(selected),
            version: magmon_core::VersionView {
                version_id: Some(version_id),
                version_number: 1,
                created_at: None,
                notes: None,
                decklist_text: None,
                is_current: true,
                is_placeholder: false,
            },
        }
    }

    #[test]
    fn failed_version_switch_restores_the_selection() {
        let switching = PageState {
            snapshot: Some(snapshot_showing(1, 2)),
            version_loading: true,
            ..PageState::default()
        };
        let err = magmon_core::ApiError::Transport("timeout of 10000ms exceeded".into());
        let settled = switching.settle(VersionSwitch::Failed(snapshot_showing(1, 1), err));
        assert_eq!(settled.snapshot.map(|s| s.selected_version_id), Some(Some(1)));
        assert!(!settled.version_loading);
        assert!(matches!(
            settled.version_flash,
            Some(Flash::Error(ref text)) if text.starts_with("Failed to load version details: ")
        ));
    }

    #[test]
    fn owner_badge_links_to_the_player() {
        let html = block_on(LocalServerRenderer::<Harness>::new().render());
        assert!(html.contains("href=\"/players/7\""), "{html}");
        assert!(html.contains("Rhys"));
        assert!(html.contains("avatar-default.svg"));
    }
}
