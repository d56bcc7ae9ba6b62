use crate::components::status::{Flash, StatusLine};
use crate::components::version_panel::VersionPanel;
use crate::context::use_app_context;
use crate::hooks::use_request_sequence;
use crate::i18n::{t, tr};
use crate::router::Route;
use magmon_core::actions::decks;
use magmon_core::model::{DeckDetail, DeckVersionDetail};
use magmon_core::{VersionView, display_colors};
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub deck_id: i64,
    pub version_id: i64,
}

#[function_component(DeckVersionDetailPage)]
pub fn deck_version_detail_page(props: &Props) -> Html {
    let ctx = use_app_context();
    let seq = use_request_sequence();
    let loaded = use_state(|| None::<(DeckDetail, DeckVersionDetail)>);
    let loading = use_state(|| true);
    let flash = use_state(|| None::<Flash>);

    {
        let api = Rc::clone(&ctx.api);
        let (loaded, loading, flash) = (loaded.clone(), loading.clone(), flash.clone());
        use_effect_with((props.deck_id, props.version_id), move |&(deck_id, version_id)| {
            let ticket = seq.issue();
            loading.set(true);
            spawn_local(async move {
                let result = decks::load_version_page(&api, deck_id, version_id).await;
                if !seq.is_current(ticket) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(pair) => loaded.set(Some(pair)),
                    Err(err) => {
                        loaded.set(None);
                        flash.set(Some(Flash::failure("errors.version_load", &err)));
                    }
                }
            });
            || {}
        });
    }

    if *loading {
        return html! { <p aria-busy="true">{ t("versions.loading_detail") }</p> };
    }
    let Some((deck, version)) = (*loaded).clone() else {
        return html! {
            <StatusLine flash={(*flash).clone().or_else(|| Some(Flash::Info(t("versions.not_found"))))} />
        };
    };

    let number = version.version_number.to_string();
    let mut args = BTreeMap::new();
    args.insert("name", deck.name.as_str());
    args.insert("number", number.as_str());
    html! {
        <article class="deck-version-detail">
            <header>
                <nav class="row-actions">
                    <Link<Route> to={Route::DeckVersions { deck_id: deck.id }} classes="outline secondary small">
                        { t("versions.back_to_versions") }
                    </Link<Route>>
                    <Link<Route> to={Route::DeckDetail { deck_id: deck.id }} classes="outline secondary small">
                        { t("versions.back_to_deck") }
                    </Link<Route>>
                </nav>
                <hgroup>
                    <h3>{ tr("versions.title_for", Some(&args)) }</h3>
                    <h4>{ format!("{}: {} ({})", t("decks.commander"), deck.commander, display_colors(&deck.colors)) }</h4>
                </hgroup>
            </header>
            <VersionPanel view={VersionView::from_detail(version)} />
        </article>
    }
}
