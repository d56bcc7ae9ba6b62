use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::i18n::{fmt_date, t, tr};
use crate::pages::games::registration::RegistrationForm;
use crate::pages::games::results_form::ResultsForm;
use crate::pages::games::review::MatchResult;
use crate::router::{DeckFocus, Route};
use chrono::NaiveDate;
use magmon_core::actions::{GameDetails, ReviewOutcome};
use magmon_core::games::{is_registered, players_needed};
use magmon_core::model::{Deck, Game, GameStatus, Registration};
use magmon_core::display_status;
use std::collections::BTreeMap;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub game: Game,
    pub today: NaiveDate,
    pub details: Option<GameDetails>,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub flash: Option<Flash>,
    /// The signed-in user's decks, offered for registration.
    pub decks: Vec<Deck>,
    pub on_details: Callback<GameDetails>,
    pub on_outcome: Callback<ReviewOutcome>,
    pub on_flash: Callback<Flash>,
    pub on_unregister: Callback<()>,
    pub on_cancel_game: Callback<()>,
}

#[derive(Properties, PartialEq, Clone)]
struct ParticipantsProps {
    registrations: Vec<Registration>,
    user_id: i64,
    on_unregister: Callback<()>,
}

/// Registrations of an upcoming game, with an unregister button on the user's row.
#[function_component(Participants)]
fn participants(props: &ParticipantsProps) -> Html {
    let navigator = use_navigator();
    let count = props.registrations.len().to_string();
    let mut args = BTreeMap::new();
    args.insert("count", count.as_str());

    html! {
        <>
            <h6>{ tr("games.participants_count", Some(&args)) }</h6>
            if props.registrations.is_empty() {
                <p><small>{ t("games.no_participants") }</small></p>
            } else {
                <table class="participants-table">
                    <thead>
                        <tr>
                            <th scope="col">{ t("games.player") }</th>
                            <th scope="col">{ t("games.deck") }</th>
                            <th scope="col">{ t("decks.commander") }</th>
                            <th scope="col">{ t("games.action") }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for props.registrations.iter().map(|reg| {
                            let own = reg.user_id == props.user_id;
                            let open_deck = {
                                let navigator = navigator.clone();
                                let focus = DeckFocus {
                                    deck_id: Some(reg.deck_id),
                                    version_id: reg.deck_version_id,
                                };
                                let deck_id = reg.deck_id;
                                Callback::from(move |_: MouseEvent| {
                                    if let Some(nav) = navigator.as_ref() {
                                        nav.push_with_state(&Route::DeckDetail { deck_id }, focus);
                                    }
                                })
                            };
                            let unregister = {
                                let cb = props.on_unregister.clone();
                                Callback::from(move |_: MouseEvent| cb.emit(()))
                            };
                            let deck_label = if reg.deck_name.is_empty() {
                                format!("{} {}", t("games.deck"), reg.deck_id)
                            } else {
                                reg.deck_name.clone()
                            };
                            html! {
                                <tr key={reg.registration_id}>
                                    <td>
                                        <Link<Route> to={Route::PlayerDetail { user_id: reg.user_id }}>
                                            { reg.username.clone() }
                                        </Link<Route>>
                                        if own { { format!(" {}", t("games.you")) } }
                                    </td>
                                    <td><button type="button" class="link" onclick={open_deck}>{ deck_label }</button></td>
                                    <td>{ reg.commander.clone() }</td>
                                    <td>
                                        if own {
                                            <button type="button" class="outline contrast small" onclick={unregister}>
                                                { t("games.unregister") }
                                            </button>
                                        }
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            }
        </>
    }
}

/// Right-hand panel of the games page for the selected game.
#[function_component(GameDetail)]
pub fn game_detail(props: &Props) -> Html {
    let ctx = use_app_context();
    let show_submission = use_state(|| false);
    {
        let show_submission = show_submission.clone();
        use_effect_with(props.game.id, move |_| {
            show_submission.set(false);
            || {}
        });
    }

    let game = &props.game;
    let open_submission = {
        let show_submission = show_submission.clone();
        Callback::from(move |_: MouseEvent| show_submission.set(true))
    };
    let close_submission = {
        let show_submission = show_submission.clone();
        Callback::from(move |()| show_submission.set(false))
    };
    let cancel_game = {
        let cb = props.on_cancel_game.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_submitted = {
        let show_submission = show_submission.clone();
        let cb = props.on_outcome.clone();
        Callback::from(move |outcome: ReviewOutcome| {
            show_submission.set(false);
            cb.emit(outcome);
        })
    };

    let body = match props.details.as_ref() {
        _ if props.loading => html! { <p aria-busy="true">{ t("games.loading_details") }</p> },
        None => Html::default(),
        Some(details) => match details.match_details.as_ref() {
            Some(match_details) if !*show_submission => html! {
                <MatchResult
                    game_id={game.id}
                    details={match_details.clone()}
                    registrations={details.registrations.clone()}
                    initial_notes={details.review_notes.clone()}
                    on_reviewed={props.on_outcome.clone()}
                    on_flash={props.on_flash.clone()}
                />
            },
            None if game.status == GameStatus::Upcoming && *show_submission => html! {
                <>
                    <hr />
                    <ResultsForm
                        game_id={game.id}
                        registrations={details.registrations.clone()}
                        on_submitted={on_submitted}
                        on_cancel={close_submission}
                        on_flash={props.on_flash.clone()}
                    />
                </>
            },
            None if game.status == GameStatus::Upcoming => {
                let registered = details.registrations.len();
                let needed = players_needed(registered);
                let submit_label = if needed > 0 {
                    let needed = needed.to_string();
                    let mut args = BTreeMap::new();
                    args.insert("count", needed.as_str());
                    tr("games.submit_results_need", Some(&args))
                } else {
                    t("games.submit_results")
                };
                html! {
                    <>
                        <hr />
                        if is_registered(&details.registrations, ctx.user_id()) {
                            <Participants
                                registrations={details.registrations.clone()}
                                user_id={ctx.user_id()}
                                on_unregister={props.on_unregister.clone()}
                            />
                        } else {
                            <RegistrationForm
                                game={game.clone()}
                                decks={props.decks.clone()}
                                on_registered={props.on_details.clone()}
                                on_flash={props.on_flash.clone()}
                            />
                        }
                        <hr />
                        <div class="form-actions">
                            <button type="button" class="outline" onclick={open_submission} disabled={needed > 0}>
                                { submit_label }
                            </button>
                            <button type="button" class="secondary outline contrast" onclick={cancel_game}>
                                { t("games.cancel_game") }
                            </button>
                        </div>
                    </>
                }
            }
            _ => Html::default(),
        },
    };

    html! {
        <article class="game-detail">
            <h4>{ fmt_date(&game.game_date) }</h4>
            <p><strong>{ format!("{}: ", t("games.status")) }</strong>{ display_status(game, props.today).label() }</p>
            if game.is_pauper {
                <p><strong>{ format!("{}: ", t("games.format")) }</strong>{ t("games.pauper") }</p>
            }
            if let Some(notes) = game.details.as_deref().filter(|d| !d.trim().is_empty()) {
                <p><strong>{ format!("{}: ", t("games.notes")) }</strong>{ notes.to_string() }</p>
            }
            { body }
            <StatusLine flash={props.flash.clone()} />
        </article>
    }
}
