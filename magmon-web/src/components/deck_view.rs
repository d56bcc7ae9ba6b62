//! Deck card shared by the decks, deck detail and player detail pages.

use crate::components::history_table::HistoryTable;
use crate::components::status::{Flash, StatusLine};
use crate::components::version_panel::VersionPanel;
use crate::components::version_select::VersionSelect;
use crate::i18n::{fmt_datetime, t};
use crate::router::Route;
use magmon_core::{DeckSnapshot, display_colors};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub snapshot: DeckSnapshot,
    pub on_select_version: Callback<i64>,
    #[prop_or_default]
    pub version_loading: bool,
    #[prop_or_default]
    pub version_flash: Option<Flash>,
    /// Show links to the deck's own pages.
    #[prop_or(true)]
    pub show_links: bool,
    /// Extra header content, such as an owner badge or an edit button.
    #[prop_or_default]
    pub children: Children,
}

#[function_component(DeckView)]
pub fn deck_view(props: &Props) -> Html {
    let snapshot = &props.snapshot;
    let deck = &snapshot.deck;
    let select_id = format!("deck-{}-version", deck.id);

    html! {
        <article class="deck-view" aria-labelledby={format!("deck-{}-title", deck.id)}>
            <header>
                <h3 id={format!("deck-{}-title", deck.id)}>{ deck.name.clone() }</h3>
                <p>
                    <strong>{ format!("{}: ", t("decks.commander")) }</strong>{ deck.commander.clone() }
                    <br />
                    <strong>{ format!("{}: ", t("decks.colors")) }</strong>{ display_colors(&deck.colors) }
                    if let Some(updated) = deck.last_updated.as_deref() {
                        <br />
                        <small>{ format!("{}: {}", t("decks.last_updated"), fmt_datetime(updated)) }</small>
                    }
                </p>
                { for props.children.iter() }
            </header>

            if snapshot.has_versions() {
                <label for={select_id.clone()}>{ t("versions.select") }</label>
                <VersionSelect
                    id={select_id}
                    versions={snapshot.versions.clone()}
                    selected={snapshot.selected_version_id}
                    on_select={props.on_select_version.clone()}
                    disabled={props.version_loading}
                />
            }
            <StatusLine flash={props.version_flash.clone()} />
            <VersionPanel view={snapshot.version.clone()} loading={props.version_loading} />

            if props.show_links {
                <nav class="deck-view__links" aria-label={t("decks.links")}>
                    <Link<Route> to={Route::DeckDetail { deck_id: deck.id }}>{ t("decks.open_page") }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::DeckVersions { deck_id: deck.id }}>{ t("versions.all") }</Link<Route>>
                </nav>
            }

            <h4>{ t("history.title") }</h4>
            <HistoryTable history={snapshot.history.clone()} />
        </article>
    }
}
