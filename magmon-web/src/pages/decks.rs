//! Own decks: create form, deck table, viewer and the new-version editor.

use crate::components::color_picker::ColorPicker;
use crate::components::deck_view::DeckView;
use crate::components::status::{Flash, StatusLine};
use crate::components::version_editor::VersionEditor;
use crate::context::use_app_context;
use crate::hooks::{use_deck_viewer, use_request_sequence};
use crate::i18n::t;
use crate::pages::{bind_input, bind_textarea};
use crate::router::{DeckFocus, Route};
use magmon_core::actions::{DeckForm, decks};
use magmon_core::model::Deck;
use magmon_core::{ColorSet, display_colors};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DeckTableProps {
    pub decks: Vec<Deck>,
    /// Deck whose details are loading; its buttons are hidden meanwhile.
    #[prop_or_default]
    pub busy_deck: Option<i64>,
    pub on_view: Callback<i64>,
    pub on_edit: Callback<Deck>,
}

#[function_component(DeckTable)]
pub fn deck_table(props: &DeckTableProps) -> Html {
    if props.decks.is_empty() {
        return html! { <p><small>{ t("decks.none") }</small></p> };
    }
    html! {
        <table class="deck-table">
            <thead>
                <tr>
                    <th scope="col">{ t("decks.name") }</th>
                    <th scope="col">{ t("decks.commander") }</th>
                    <th scope="col">{ t("decks.colors") }</th>
                    <th scope="col">{ t("decks.actions") }</th>
                </tr>
            </thead>
            <tbody>
                { for props.decks.iter().map(|deck| {
                    let busy = props.busy_deck == Some(deck.id);
                    let on_view = {
                        let cb = props.on_view.clone();
                        let id = deck.id;
                        Callback::from(move |_: MouseEvent| cb.emit(id))
                    };
                    let on_edit = {
                        let cb = props.on_edit.clone();
                        let deck = deck.clone();
                        Callback::from(move |_: MouseEvent| cb.emit(deck.clone()))
                    };
                    html! {
                        <tr key={deck.id}>
                            <td>{ deck.name.clone() }</td>
                            <td>{ deck.commander.clone() }</td>
                            <td>{ display_colors(&deck.colors) }</td>
                            <td>
                                <div class="row-actions" aria-busy={busy.to_string()}>
                                    if !busy {
                                        <>
                                        <button
                                            type="button"
                                            id={format!("deck-{}-view", deck.id)}
                                            class="outline secondary small"
                                            onclick={on_view}
                                        >
                                            { t("common.view") }
                                        </button>
                                        <button
                                            type="button"
                                            id={format!("deck-{}-edit", deck.id)}
                                            class="outline contrast small"
                                            onclick={on_edit}
                                        >
                                            { t("common.edit") }
                                        </button>
                                        </>
                                    }
                                </div>
                            </td>
                        </tr>
                    }
                }) }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct DeckCreateFormProps {
    pub owner_id: i64,
    pub on_created: Callback<Vec<Deck>>,
    pub on_flash: Callback<Flash>,
}

#[function_component(DeckCreateForm)]
pub fn deck_create_form(props: &DeckCreateFormProps) -> Html {
    let ctx = use_app_context();
    let name = use_state(String::new);
    let commander = use_state(String::new);
    let colors = use_state(ColorSet::empty);
    let decklist = use_state(String::new);
    let busy = use_state(|| false);

    let on_colors = {
        let colors = colors.clone();
        Callback::from(move |set: ColorSet| colors.set(set))
    };
    let on_submit = {
        let api = Rc::clone(&ctx.api);
        let owner_id = props.owner_id;
        let (name, commander, colors, decklist, busy) = (
            name.clone(),
            commander.clone(),
            colors.clone(),
            decklist.clone(),
            busy.clone(),
        );
        let (on_created, on_flash) = (props.on_created.clone(), props.on_flash.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = DeckForm {
                name: (*name).clone(),
                commander: (*commander).clone(),
                colors: *colors,
                decklist_text: (*decklist).clone(),
            };
            let api = Rc::clone(&api);
            let (name, commander, colors, decklist, busy) = (
                name.clone(),
                commander.clone(),
                colors.clone(),
                decklist.clone(),
                busy.clone(),
            );
            let (on_created, on_flash) = (on_created.clone(), on_flash.clone());
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = decks::create_deck(&api, owner_id, &form).await;
                busy.set(false);
                match result {
                    Ok(list) => {
                        name.set(String::new());
                        commander.set(String::new());
                        colors.set(ColorSet::empty());
                        decklist.set(String::new());
                        on_created.emit(list);
                        on_flash.emit(Flash::Success(t("decks.created")));
                    }
                    Err(err) => on_flash.emit(Flash::failure("errors.deck_create", &err)),
                }
            });
        })
    };

    html! {
        <form class="deck-create" onsubmit={on_submit}>
            <h4>{ t("decks.create_title") }</h4>
            <label for="deck-name">{ t("decks.name") }</label>
            <input id="deck-name" type="text" required=true value={(*name).clone()} oninput={bind_input(&name)} />
            <label for="deck-commander">{ t("decks.commander") }</label>
            <input id="deck-commander" type="text" required=true value={(*commander).clone()} oninput={bind_input(&commander)} />
            <ColorPicker value={*colors} on_change={on_colors} disabled={*busy} />
            <label for="deck-list">{ t("versions.decklist") }</label>
            <textarea id="deck-list" rows="8" value={(*decklist).clone()} oninput={bind_textarea(&decklist)} />
            <button type="submit" disabled={*busy} aria-busy={busy.to_string()}>{ t("decks.create") }</button>
        </form>
    }
}

/// Deck opened in the new-version editor.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Editing {
    deck: Deck,
    decklist: String,
}

#[function_component(DecksPage)]
pub fn decks_page() -> Html {
    let ctx = use_app_context();
    let seq = use_request_sequence();
    let viewer = use_deck_viewer();
    let navigator = use_navigator();
    let focus = use_location().and_then(|l| l.state::<DeckFocus>());

    let decks_list = use_state(Vec::<Deck>::new);
    let loading = use_state(|| true);
    let flash = use_state(|| None::<Flash>);
    let editing = use_state(|| None::<Editing>);

    let reload = {
        let api = Rc::clone(&ctx.api);
        let user_id = ctx.user_id();
        let (decks_list, loading, flash, seq) =
            (decks_list.clone(), loading.clone(), flash.clone(), Rc::clone(&seq));
        Callback::from(move |()| {
            let ticket = seq.issue();
            let api = Rc::clone(&api);
            let seq = Rc::clone(&seq);
            let (decks_list, loading, flash) = (decks_list.clone(), loading.clone(), flash.clone());
            wasm_bindgen_futures::spawn_local(async move {
                let result = api.user_decks(user_id).await;
                if !seq.is_current(ticket) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(list) => decks_list.set(list),
                    Err(err) => flash.set(Some(Flash::failure("errors.decks_load", &err))),
                }
            });
        })
    };
    {
        let reload = reload.clone();
        use_effect_with((), move |()| {
            reload.emit(());
            || {}
        });
    }

    // Honor a deck/version handed over by another page, once, after the list arrives.
    {
        let open = viewer.open.clone();
        let open_deck = viewer.state.deck_id;
        let target = focus.as_deref().copied();
        let decks_list = decks_list.clone();
        use_effect_with((target, decks_list.len()), move |(target, _)| {
            if let Some(DeckFocus {
                deck_id: Some(deck_id),
                version_id,
            }) = *target
                && decks_list.iter().any(|d| d.id == deck_id)
                && open_deck != Some(deck_id)
            {
                log::debug!("auto-selecting deck {deck_id} version {version_id:?}");
                open.emit((deck_id, version_id));
                if let Some(nav) = navigator.as_ref() {
                    nav.replace(&Route::Decks);
                }
            }
            || {}
        });
    }

    let on_created = {
        let decks_list = decks_list.clone();
        Callback::from(move |list: Vec<Deck>| decks_list.set(list))
    };
    let on_flash = {
        let flash = flash.clone();
        Callback::from(move |f: Flash| flash.set(Some(f)))
    };
    let on_view = {
        let open = viewer.open.clone();
        Callback::from(move |deck_id: i64| open.emit((deck_id, None)))
    };
    let on_edit = {
        let api = Rc::clone(&ctx.api);
        let (editing, flash) = (editing.clone(), flash.clone());
        Callback::from(move |deck: Deck| {
            let api = Rc::clone(&api);
            let (editing, flash) = (editing.clone(), flash.clone());
            wasm_bindgen_futures::spawn_local(async move {
                match decks::current_decklist(&api, deck.id).await {
                    Ok(decklist) => editing.set(Some(Editing { deck, decklist })),
                    Err(err) => flash.set(Some(Flash::failure("errors.edit_load", &err))),
                }
            });
        })
    };
    let close_editor = {
        let editing = editing.clone();
        Callback::from(move |()| editing.set(None))
    };
    let on_version_created = {
        let (editing, flash, reload) = (editing.clone(), flash.clone(), reload.clone());
        let open = viewer.open.clone();
        let open_deck = viewer.state.deck_id;
        Callback::from(move |message: String| {
            let edited = editing.as_ref().map(|e| e.deck.id);
            editing.set(None);
            flash.set(Some(Flash::Success(message)));
            reload.emit(());
            if let Some(deck_id) = edited.filter(|id| open_deck == Some(*id)) {
                open.emit((deck_id, None));
            }
        })
    };
    let close_viewer = {
        let close = viewer.close.clone();
        Callback::from(move |_: MouseEvent| close.emit(()))
    };

    let busy_deck = viewer.state.deck_id.filter(|_| viewer.state.loading);
    let editor = editing.as_ref().map_or_else(Html::default, |e| {
        html! {
            <VersionEditor
                open=true
                deck_id={e.deck.id}
                deck_name={e.deck.name.clone()}
                initial_decklist={e.decklist.clone()}
                on_close={close_editor.clone()}
                on_created={on_version_created.clone()}
                return_focus_id={Some(AttrValue::from(format!("deck-{}-edit", e.deck.id)))}
            />
        }
    });

    html! {
        <section class="decks-page">
            <h3>{ t("decks.title") }</h3>
            <div class="grid">
                <article>
                    <DeckCreateForm owner_id={ctx.user_id()} on_created={on_created} on_flash={on_flash} />
                    <StatusLine flash={(*flash).clone()} />
                </article>
                <article>
                    <h4>{ t("decks.yours") }</h4>
                    if *loading {
                        <p aria-busy="true">{ t("decks.loading") }</p>
                    } else {
                        <DeckTable
                            decks={(*decks_list).clone()}
                            busy_deck={busy_deck}
                            on_view={on_view}
                            on_edit={on_edit}
                        />
                    }
                </article>
            </div>
            if viewer.state.deck_id.is_some() {
                <article class="deck-details">
                    <div class="row-actions">
                        <button type="button" class="outline secondary contrast small" onclick={close_viewer}>
                            { t("common.close") }
                        </button>
                    </div>
                    <StatusLine flash={viewer.state.flash.clone()} />
                    if viewer.state.loading {
                        <p aria-busy="true">{ t("decks.loading_details") }</p>
                    }
                    if let Some(snapshot) = viewer.state.snapshot.clone() {
                        <DeckView
                            snapshot={snapshot}
                            on_select_version={viewer.select_version.clone()}
                            version_loading={viewer.state.version_loading}
                            version_flash={viewer.state.version_flash.clone()}
                        />
                    }
                </article>
            }
            { editor }
        </section>
    }
}
