use crate::components::status::Flash;
use crate::components::version_select::VersionSelect;
use crate::context::use_app_context;
use crate::hooks::use_request_sequence;
use crate::i18n::t;
use crate::router::{DeckFocus, Route};
use magmon_core::actions::{GameDetails, games};
use magmon_core::model::{Deck, DeckVersionSummary, Game};
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub game: Game,
    /// The signed-in user's decks.
    pub decks: Vec<Deck>,
    pub on_registered: Callback<GameDetails>,
    pub on_flash: Callback<Flash>,
}

/// Deck and version picker for joining a game.
#[function_component(RegistrationForm)]
pub fn registration_form(props: &Props) -> Html {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let seq = use_request_sequence();
    let deck_id = use_state(|| None::<i64>);
    let versions = use_state(Vec::<DeckVersionSummary>::new);
    let version_id = use_state(|| None::<i64>);
    let busy = use_state(|| false);

    let on_deck = {
        let api = Rc::clone(&ctx.api);
        let (deck_id, version_id) = (deck_id.clone(), version_id.clone());
        let versions = versions.clone();
        let on_flash = props.on_flash.clone();
        Callback::from(move |e: Event| {
            let chosen = e
                .target_unchecked_into::<HtmlSelectElement>()
                .value()
                .parse::<i64>()
                .ok();
            deck_id.set(chosen);
            versions.set(Vec::new());
            version_id.set(None);
            let Some(chosen) = chosen else {
                return;
            };
            let ticket = seq.issue();
            let api = Rc::clone(&api);
            let seq = Rc::clone(&seq);
            let (versions, version_id) = (versions.clone(), version_id.clone());
            let on_flash = on_flash.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = games::registration_versions(&api, chosen).await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok((list, preselect)) => {
                        versions.set(list);
                        version_id.set(preselect);
                    }
                    Err(err) => on_flash.emit(Flash::failure("errors.versions_load", &err)),
                }
            });
        })
    };

    let on_version = {
        let version_id = version_id.clone();
        Callback::from(move |id: i64| version_id.set(Some(id)))
    };

    let on_view = {
        let (deck_id, version_id) = (*deck_id, *version_id);
        Callback::from(move |_: MouseEvent| {
            if let Some(nav) = navigator.as_ref() {
                nav.push_with_state(&Route::Decks, DeckFocus { deck_id, version_id });
            }
        })
    };

    let on_submit = {
        let api = Rc::clone(&ctx.api);
        let game = props.game.clone();
        let (chosen_deck, chosen_version) = (*deck_id, *version_id);
        let busy = busy.clone();
        let on_registered = props.on_registered.clone();
        let on_flash = props.on_flash.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = Rc::clone(&api);
            let game = game.clone();
            let busy = busy.clone();
            let (on_registered, on_flash) = (on_registered.clone(), on_flash.clone());
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = games::register_deck(&api, &game, chosen_deck, chosen_version).await;
                busy.set(false);
                match result {
                    Ok(details) => {
                        on_registered.emit(details);
                        on_flash.emit(Flash::Success(t("games.registered")));
                    }
                    Err(err) => on_flash.emit(Flash::failure("errors.registration", &err)),
                }
            });
        })
    };

    if props.decks.is_empty() {
        return html! { <p><small>{ t("games.create_deck_first") }</small></p> };
    }

    let selected_deck = deck_id.map(|id| id.to_string()).unwrap_or_default();
    html! {
        <form class="registration" onsubmit={on_submit}>
            <h6>{ t("games.register_title") }</h6>
            <div class="grid">
                <div>
                    <label for="reg-deck">{ t("games.deck") }</label>
                    <select id="reg-deck" required=true onchange={on_deck}>
                        <option value="" disabled=true selected={deck_id.is_none()}>{ t("games.choose_deck") }</option>
                        { for props.decks.iter().map(|deck| {
                            let value = deck.id.to_string();
                            html! {
                                <option value={value.clone()} selected={value == selected_deck}>
                                    { format!("{} ({})", deck.name, deck.commander) }
                                </option>
                            }
                        }) }
                    </select>
                </div>
                <div>
                    <label for="reg-version">{ t("games.version") }</label>
                    <div class="inline">
                        <VersionSelect
                            id="reg-version"
                            versions={(*versions).clone()}
                            selected={*version_id}
                            on_select={on_version}
                            disabled={deck_id.is_none()}
                            placeholder={Some(AttrValue::from(t("games.choose_version")))}
                        />
                        if deck_id.is_some() && version_id.is_some() {
                            <button type="button" class="outline secondary" title={t("games.view_version")} onclick={on_view}>
                                { t("common.view") }
                            </button>
                        }
                    </div>
                </div>
            </div>
            <button type="submit" disabled={*busy || deck_id.is_none() || version_id.is_none()} aria-busy={busy.to_string()}>
                { t("games.register") }
            </button>
        </form>
    }
}
