use crate::components::status::Flash;
use crate::context::use_app_context;
use crate::i18n::{fmt_datetime, t, tr};
use crate::pages::bind_textarea;
use crate::router::Route;
use magmon_core::actions::{ReviewOutcome, games};
use magmon_core::games::can_review;
use magmon_core::model::{MatchDetails, MatchStatus, Registration};
use magmon_core::{ApiResult, display_colors};
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

fn player_link(user_id: i64, name: Option<&str>) -> Html {
    let label = name.map_or_else(|| format!("{} {user_id}", t("common.user")), ToString::to_string);
    html! { <Link<Route> to={Route::PlayerDetail { user_id }}>{ label }</Link<Route>> }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub game_id: i64,
    pub details: MatchDetails,
    pub registrations: Vec<Registration>,
    /// Prefill for the review box.
    pub initial_notes: String,
    pub on_reviewed: Callback<ReviewOutcome>,
    pub on_flash: Callback<Flash>,
}

/// A submitted result with its participants, notes and the review controls.
#[function_component(MatchResult)]
pub fn match_result(props: &Props) -> Html {
    let ctx = use_app_context();
    let notes = use_state(|| props.initial_notes.clone());
    let busy = use_state(|| false);
    {
        let notes = notes.clone();
        use_effect_with(props.initial_notes.clone(), move |initial| {
            notes.set(initial.clone());
            || {}
        });
    }

    let details = &props.details;
    let reviewer = can_review(details, ctx.user_id());

    let review = |approve: bool| {
        let api = Rc::clone(&ctx.api);
        let (game_id, match_id) = (props.game_id, details.match_id);
        let notes = notes.clone();
        let busy = busy.clone();
        let (on_reviewed, on_flash) = (props.on_reviewed.clone(), props.on_flash.clone());
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let text = (*notes).clone();
            let api = Rc::clone(&api);
            let busy = busy.clone();
            let (on_reviewed, on_flash) = (on_reviewed.clone(), on_flash.clone());
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result: ApiResult<ReviewOutcome> = if approve {
                    games::approve_result(&api, game_id, match_id, &text).await
                } else {
                    games::reject_result(&api, game_id, match_id, &text).await
                };
                busy.set(false);
                match (result, approve) {
                    (Ok(outcome), true) => {
                        on_reviewed.emit(outcome);
                        on_flash.emit(Flash::Success(t("games.approved")));
                    }
                    (Ok(outcome), false) => {
                        on_reviewed.emit(outcome);
                        on_flash.emit(Flash::Success(t("games.rejected")));
                    }
                    (Err(err), true) => on_flash.emit(Flash::failure("errors.approval", &err)),
                    (Err(err), false) => on_flash.emit(Flash::failure("errors.rejection", &err)),
                }
            });
        })
    };

    let status = details.status.as_str().to_string();
    let mut args = BTreeMap::new();
    args.insert("status", status.as_str());
    let has_notes = details.notes_big_interaction.is_some()
        || details.notes_rules_discussion.is_some()
        || details.notes_end_summary.is_some();
    let note_line = |key: &str, value: Option<&String>| {
        value.map_or_else(Html::default, |text| html! {
            <p><small><strong>{ format!("{}: ", t(key)) }</strong>{ text.clone() }</small></p>
        })
    };

    html! {
        <section class="match-result">
            <hr />
            <h5>{ t("games.participants") }</h5>
            if props.registrations.is_empty() {
                <p><small>{ t("games.no_players") }</small></p>
            } else {
                <div class="scroll-x">
                    <table class="participants-table">
                        <thead>
                            <tr>
                                <th scope="col">{ t("games.player") }</th>
                                <th scope="col">{ t("games.deck_name") }</th>
                                <th scope="col">{ t("decks.commander") }</th>
                                <th scope="col">{ t("decks.colors") }</th>
                                <th scope="col">{ t("games.place") }</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for props.registrations.iter().map(|reg| {
                                let place = details
                                    .players
                                    .iter()
                                    .find(|p| p.user_id == reg.user_id)
                                    .map_or_else(|| t("common.na"), |p| p.placement.to_string());
                                html! {
                                    <tr key={reg.registration_id}>
                                        <td>{ player_link(reg.user_id, Some(reg.username.as_str())) }</td>
                                        <td>
                                            <Link<Route> to={Route::DeckDetail { deck_id: reg.deck_id }}>
                                                { reg.deck_name.clone() }
                                            </Link<Route>>
                                        </td>
                                        <td>{ reg.commander.clone() }</td>
                                        <td>{ display_colors(&reg.colors) }</td>
                                        <td>{ place }</td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                </div>
            }

            <hr />
            <h5>{ tr("games.result_title", Some(&args)) }</h5>
            <p><small>
                { format!("{}: ", t("games.submitted_by")) }
                { player_link(details.submitted_by_id, details.submitted_by_username.as_deref()) }
                if let Some(created) = details.created_at.as_deref() {
                    { format!(" ({})", fmt_datetime(created)) }
                }
            </small></p>
            if details.status == MatchStatus::Approved {
                if let Some(approver) = details.approved_by_id {
                    <p><small>
                        { format!("{}: ", t("games.approved_by")) }
                        { player_link(approver, details.approved_by_username.as_deref()) }
                        if let Some(at) = details.approved_at.as_deref() {
                            { format!(" ({})", fmt_datetime(at)) }
                        }
                    </small></p>
                }
            }
            if let Some(review_notes) = details.approval_notes.as_deref() {
                <p><strong>{ format!("{}: ", t("games.review_notes")) }</strong>{ review_notes.to_string() }</p>
            }
            if has_notes {
                <hr />
                <h6>{ t("games.submitted_notes") }</h6>
            }
            { note_line("games.big_interaction", details.notes_big_interaction.as_ref()) }
            { note_line("games.rules_discussion", details.notes_rules_discussion.as_ref()) }
            { note_line("games.end_summary", details.notes_end_summary.as_ref()) }

            if details.status == MatchStatus::Pending {
                <hr />
                <h6>{ t("games.review_title") }</h6>
                if !reviewer {
                    <p><small><i>{ t("games.own_submission") }</i></small></p>
                }
                <form onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                    <label for="review-notes">{ t("games.review_notes_label") }</label>
                    <textarea id="review-notes" rows="3" value={(*notes).clone()}
                        oninput={bind_textarea(&notes)} disabled={!reviewer || *busy} />
                    <div class="grid">
                        <button type="button" onclick={review(true)} disabled={!reviewer || *busy} aria-busy={busy.to_string()}>
                            { t("games.approve") }
                        </button>
                        <button type="button" class="secondary" onclick={review(false)}
                            disabled={!reviewer || *busy || notes.trim().is_empty()}>
                            { t("games.reject") }
                        </button>
                    </div>
                </form>
            }
        </section>
    }
}
