use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::hooks::use_request_sequence;
use crate::i18n::{fmt_date, fmt_datetime, t, tr};
use crate::router::{GameQuery, Route};
use magmon_core::actions::games;
use magmon_core::model::MatchSummary;
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PendingResultsProps {
    pub results: Vec<MatchSummary>,
}

/// Match results awaiting approval, each linking to its game.
#[function_component(PendingResults)]
pub fn pending_results(props: &PendingResultsProps) -> Html {
    if props.results.is_empty() {
        return html! { <p class="muted">{ t("dashboard.none_pending") }</p> };
    }
    html! {
        <ul class="pending-results">
            { for props.results.iter().map(|result| {
                let date = result
                    .game_date
                    .as_deref()
                    .map_or_else(|| t("common.unknown"), fmt_date);
                let count = result.player_count.to_string();
                let submitter = result.submitted_by.clone().unwrap_or_else(|| t("common.unknown"));
                let mut args = BTreeMap::new();
                args.insert("date", date.as_str());
                args.insert("count", count.as_str());
                args.insert("name", submitter.as_str());
                let query = GameQuery { game_id: Some(result.game_id) };
                html! {
                    <li key={result.match_id}>
                        <Link<Route, GameQuery> to={Route::Games} query={Some(query)}>
                            { tr("dashboard.pending_item", Some(&args)) }
                        </Link<Route, GameQuery>>
                        if let Some(created) = result.created_at.as_deref() {
                            <small>{ format!(" ({})", fmt_datetime(created)) }</small>
                        }
                    </li>
                }
            }) }
        </ul>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let ctx = use_app_context();
    let seq = use_request_sequence();
    let results = use_state(Vec::<MatchSummary>::new);
    let loading = use_state(|| true);
    let flash = use_state(|| None::<Flash>);

    {
        let api = Rc::clone(&ctx.api);
        let results = results.clone();
        let loading = loading.clone();
        let flash = flash.clone();
        use_effect_with((), move |()| {
            let ticket = seq.issue();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = games::pending_results(&api).await;
                if !seq.is_current(ticket) {
                    return;
                }
                loading.set(false);
                match outcome {
                    Ok(list) => results.set(list),
                    Err(err) => flash.set(Some(Flash::failure("errors.matches_load", &err))),
                }
            });
            || {}
        });
    }

    let name = ctx.user.as_ref().map(|u| u.username.clone()).unwrap_or_default();
    let mut args = BTreeMap::new();
    args.insert("name", name.as_str());

    html! {
        <section class="dashboard">
            <h1>{ tr("dashboard.title", Some(&args)) }</h1>
            <h2>{ t("dashboard.pending_title") }</h2>
            <StatusLine flash={(*flash).clone()} />
            if *loading {
                <p aria-busy="true">{ t("common.loading") }</p>
            } else {
                <PendingResults results={(*results).clone()} />
            }
        </section>
    }
}
