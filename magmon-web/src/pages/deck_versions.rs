use crate::components::status::{Flash, StatusLine};
use crate::components::version_editor::VersionEditor;
use crate::context::use_app_context;
use crate::hooks::use_request_sequence;
use crate::i18n::{fmt_date, t, tr};
use crate::router::Route;
use magmon_core::actions::decks;
use magmon_core::display_colors;
use magmon_core::model::{DeckDetail, DeckVersionSummary};
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct VersionTableProps {
    pub deck_id: i64,
    pub versions: Vec<DeckVersionSummary>,
}

#[function_component(VersionTable)]
pub fn version_table(props: &VersionTableProps) -> Html {
    if props.versions.is_empty() {
        return html! { <p><i>{ t("versions.none_found") }</i></p> };
    }
    html! {
        <div class="table-scroll">
            <table role="grid">
                <thead>
                    <tr>
                        <th scope="col">{ t("versions.version") }</th>
                        <th scope="col">{ t("versions.created") }</th>
                        <th scope="col">{ t("versions.notes") }</th>
                        <th scope="col">{ t("versions.status") }</th>
                        <th scope="col">{ t("decks.actions") }</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.versions.iter().map(|v| html! {
                        <tr key={v.id} class={classes!(v.is_current.then_some("current"))}>
                            <td>{ v.version_number }</td>
                            <td>{ v.created_at.as_deref().map(fmt_date).unwrap_or_default() }</td>
                            <td>{ v.notes.clone().unwrap_or_default() }</td>
                            <td>{ if v.is_current { t("versions.current") } else { String::new() } }</td>
                            <td>
                                <Link<Route>
                                    to={Route::DeckVersionDetail { deck_id: props.deck_id, version_id: v.id }}
                                    classes="outline secondary small"
                                >
                                    { t("common.view") }
                                </Link<Route>>
                            </td>
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub deck_id: i64,
}

#[function_component(DeckVersionsPage)]
pub fn deck_versions_page(props: &Props) -> Html {
    let ctx = use_app_context();
    let seq = use_request_sequence();
    let deck = use_state(|| None::<DeckDetail>);
    let versions = use_state(Vec::<DeckVersionSummary>::new);
    let loading = use_state(|| true);
    let flash = use_state(|| None::<Flash>);
    let editor_open = use_state(|| false);
    // Bumped to refetch after a version is created.
    let revision = use_state(|| 0_u32);

    {
        let api = Rc::clone(&ctx.api);
        let seq = Rc::clone(&seq);
        let (deck, versions, loading, flash) =
            (deck.clone(), versions.clone(), loading.clone(), flash.clone());
        use_effect_with((props.deck_id, *revision), move |(deck_id, _)| {
            let deck_id = *deck_id;
            let ticket = seq.issue();
            spawn_local(async move {
                let result = decks::load_version_table(&api, deck_id).await;
                if !seq.is_current(ticket) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok((detail, list)) => {
                        deck.set(Some(detail));
                        versions.set(list);
                    }
                    Err(err) => flash.set(Some(Flash::failure("errors.versions_load", &err))),
                }
            });
            || {}
        });
    }

    let open_editor = {
        let editor_open = editor_open.clone();
        Callback::from(move |_: MouseEvent| editor_open.set(true))
    };
    let close_editor = {
        let editor_open = editor_open.clone();
        Callback::from(move |()| editor_open.set(false))
    };
    let on_created = {
        let (editor_open, flash, revision) = (editor_open.clone(), flash.clone(), revision.clone());
        Callback::from(move |message: String| {
            editor_open.set(false);
            flash.set(Some(Flash::Success(message)));
            revision.set(revision.wrapping_add(1));
        })
    };

    if *loading {
        return html! { <p aria-busy="true">{ t("versions.loading") }</p> };
    }
    let Some(detail) = (*deck).clone() else {
        return html! { <StatusLine flash={(*flash).clone()} /> };
    };

    let mut args = BTreeMap::new();
    args.insert("name", detail.name.as_str());
    html! {
        <article class="deck-versions">
            <header>
                <Link<Route> to={Route::DeckDetail { deck_id: detail.id }} classes="outline secondary small">
                    { t("versions.back_to_deck") }
                </Link<Route>>
                <hgroup>
                    <h3>{ tr("versions.of", Some(&args)) }</h3>
                    <h4>{ format!("{}: {} ({})", t("decks.commander"), detail.commander, display_colors(&detail.colors)) }</h4>
                </hgroup>
            </header>
            <StatusLine flash={(*flash).clone()} />
            <div class="row-actions end">
                <button type="button" id="new-version" class="primary" onclick={open_editor}>
                    { t("versions.create") }
                </button>
            </div>
            <VersionTable deck_id={detail.id} versions={(*versions).clone()} />
            <VersionEditor
                open={*editor_open}
                deck_id={detail.id}
                deck_name={detail.name.clone()}
                initial_decklist={detail.decklist_text.clone().unwrap_or_default()}
                on_close={close_editor}
                on_created={on_created}
                return_focus_id={Some(AttrValue::from("new-version"))}
            />
        </article>
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
        let versions = vec![
            DeckVersionSummary {
                id: 31,
                version_number: 2,
                created_at: Some("2025-03-14T10:00:00".into()),
                notes: Some("Cut a land".into()),
                is_current: true,
            },
            DeckVersionSummary {
                id: 30,
                version_number: 1,
                created_at: None,
                notes: None,
                is_current: false,
            },
        ];
        html! {
            <Router history={AnyHistory::from(MemoryHistory::new())}>
                <VersionTable deck_id={4} versions={versions} />
            </Router>
        }
    }

    #[test]
    fn rows_link_to_each_version() {
        let html = block_on(LocalServerRenderer::<Harness>::new().render());
        assert!(html.contains("href=\"/decks/4/versions/31\""), "{html}");
        assert!(html.contains("href=\"/decks/4/versions/30\""));
        assert!(html.contains("Cut a land"));
        assert!(html.contains("Current"));
    }

    #[test]
    fn empty_table_says_so() {
        let html = block_on(
            LocalServerRenderer::<VersionTable>::with_props(VersionTableProps {
                deck_id: 4,
                versions: Vec::new(),
            })
            .render(),
        );
        assert!(html.contains("No versions found for this deck."));
    }
}
