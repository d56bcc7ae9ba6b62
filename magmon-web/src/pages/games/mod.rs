//! Games page: game list, create form and the selected game's panel.

pub mod create_form;
pub mod detail;
pub mod list;
pub mod registration;
pub mod results_form;
pub mod review;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::hooks::use_request_sequence;
use crate::i18n::t;
use crate::router::GameQuery;
use create_form::GameCreateForm;
use detail::GameDetail;
use list::GameList;
use magmon_core::actions::{GameDetails, ReviewOutcome, games};
use magmon_core::model::{Deck, Game};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

/// Destructive actions waiting for confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Unregister,
    CancelGame,
}

#[function_component(GamesPage)]
pub fn games_page() -> Html {
    let ctx = use_app_context();
    let list_seq = use_request_sequence();
    let detail_seq = use_request_sequence();
    let location = use_location();
    let query_game = location
        .and_then(|l| l.query::<GameQuery>().ok())
        .and_then(|q| q.game_id);

    let games_list = use_state(Vec::<Game>::new);
    let list_loading = use_state(|| true);
    let list_flash = use_state(|| None::<Flash>);
    let selected = use_state(|| None::<i64>);
    let details = use_state(|| None::<GameDetails>);
    let details_loading = use_state(|| false);
    let detail_flash = use_state(|| None::<Flash>);
    let decks = use_state(Vec::<Deck>::new);
    let pending = use_state(|| None::<Pending>);
    let busy = use_state(|| false);
    let today = chrono::Local::now().date_naive();

    // Fetch a game's registrations and match, dropping answers for games no
    // longer selected.
    let load_details = {
        let api = Rc::clone(&ctx.api);
        let seq = Rc::clone(&detail_seq);
        let (details, details_loading, detail_flash) =
            (details.clone(), details_loading.clone(), detail_flash.clone());
        Callback::from(move |game: Game| {
            let ticket = seq.issue();
            let api = Rc::clone(&api);
            let seq = Rc::clone(&seq);
            let (details, details_loading, detail_flash) =
                (details.clone(), details_loading.clone(), detail_flash.clone());
            details.set(None);
            details_loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = games::load_game_details(&api, &game).await;
                if !seq.is_current(ticket) {
                    log::debug!("dropping stale details for game {}", game.id);
                    return;
                }
                details_loading.set(false);
                match result {
                    Ok(loaded) => details.set(Some(loaded)),
                    Err(err) => detail_flash.set(Some(Flash::failure("errors.details_load", &err))),
                }
            });
        })
    };

    {
        let api = Rc::clone(&ctx.api);
        let user_id = ctx.user_id();
        let (games_list, list_loading, list_flash) =
            (games_list.clone(), list_loading.clone(), list_flash.clone());
        let (selected, decks) = (selected.clone(), decks.clone());
        let load_details = load_details.clone();
        use_effect_with(query_game, move |query_game| {
            let ticket = list_seq.issue();
            let query_game = *query_game;
            wasm_bindgen_futures::spawn_local(async move {
                let result = futures::try_join!(games::load_games(&api), api.user_decks(user_id));
                if !list_seq.is_current(ticket) {
                    return;
                }
                list_loading.set(false);
                match result {
                    Ok((list, own_decks)) => {
                        if let Some(game) = query_game.and_then(|id| list.iter().find(|g| g.id == id)) {
                            selected.set(Some(game.id));
                            load_details.emit(game.clone());
                        }
                        games_list.set(list);
                        decks.set(own_decks);
                    }
                    Err(err) => list_flash.set(Some(Flash::failure("errors.games_load", &err))),
                }
            });
            || {}
        });
    }

    let on_select = {
        let (selected, details) = (selected.clone(), details.clone());
        let detail_flash = detail_flash.clone();
        let games_list = games_list.clone();
        let load_details = load_details.clone();
        let seq = Rc::clone(&detail_seq);
        Callback::from(move |game_id: i64| {
            detail_flash.set(None);
            if *selected == Some(game_id) {
                seq.invalidate();
                selected.set(None);
                details.set(None);
                return;
            }
            selected.set(Some(game_id));
            if let Some(game) = games_list.iter().find(|g| g.id == game_id) {
                load_details.emit(game.clone());
            }
        })
    };

    let on_created = {
        let games_list = games_list.clone();
        Callback::from(move |list: Vec<Game>| games_list.set(list))
    };
    let on_list_flash = {
        let list_flash = list_flash.clone();
        Callback::from(move |flash: Flash| list_flash.set(Some(flash)))
    };
    let on_detail_flash = {
        let detail_flash = detail_flash.clone();
        Callback::from(move |flash: Flash| detail_flash.set(Some(flash)))
    };
    let on_details = {
        let details = details.clone();
        Callback::from(move |loaded: GameDetails| details.set(Some(loaded)))
    };
    let on_outcome = {
        let (selected, details) = (selected.clone(), details.clone());
        let games_list = games_list.clone();
        Callback::from(move |outcome: ReviewOutcome| {
            selected.set(outcome.game.as_ref().map(|g| g.id));
            details.set(outcome.details);
            games_list.set(outcome.games);
        })
    };
    let ask = |what: Pending| {
        let pending = pending.clone();
        Callback::from(move |()| pending.set(Some(what)))
    };
    let dismiss = {
        let pending = pending.clone();
        Callback::from(move |()| pending.set(None))
    };

    let selected_game = selected.and_then(|id| games_list.iter().find(|g| g.id == id).cloned());

    let on_confirm = {
        let api = Rc::clone(&ctx.api);
        let game = selected_game.clone();
        let what = *pending;
        let (pending, busy) = (pending.clone(), busy.clone());
        let (details, games_list) = (details.clone(), games_list.clone());
        let (detail_flash, list_flash) = (detail_flash.clone(), list_flash.clone());
        Callback::from(move |()| {
            let (Some(game), Some(what)) = (game.clone(), what) else {
                return;
            };
            let api = Rc::clone(&api);
            let (pending, busy) = (pending.clone(), busy.clone());
            let (details, games_list) = (details.clone(), games_list.clone());
            let (detail_flash, list_flash) = (detail_flash.clone(), list_flash.clone());
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match what {
                    Pending::Unregister => match games::unregister(&api, &game).await {
                        Ok(loaded) => {
                            details.set(Some(loaded));
                            detail_flash.set(Some(Flash::Success(t("games.unregistered"))));
                        }
                        Err(err) => {
                            detail_flash.set(Some(Flash::failure("errors.unregistration", &err)));
                        }
                    },
                    Pending::CancelGame => match games::cancel_game(&api, game.id).await {
                        Ok(list) => {
                            games_list.set(list);
                            list_flash.set(Some(Flash::Success(t("games.cancelled"))));
                        }
                        Err(err) => {
                            list_flash.set(Some(Flash::failure("errors.cancellation", &err)));
                        }
                    },
                }
                busy.set(false);
                pending.set(None);
            });
        })
    };

    let (confirm_title, confirm_message) = match *pending {
        Some(Pending::CancelGame) => (t("games.cancel_game"), t("games.confirm_cancel")),
        _ => (t("games.unregister"), t("games.confirm_unregister")),
    };

    html! {
        <section class="games-page">
            <h3>{ t("games.title") }</h3>
            <StatusLine flash={(*list_flash).clone()} />
            <div class="grid">
                <section>
                    <article>
                        <GameCreateForm on_created={on_created} on_flash={on_list_flash} />
                    </article>
                    <article>
                        <h6>{ t("games.list_title") }</h6>
                        <GameList
                            games={(*games_list).clone()}
                            selected={*selected}
                            today={today}
                            on_select={on_select}
                            loading={*list_loading}
                        />
                    </article>
                </section>
                if let Some(game) = selected_game {
                    <GameDetail
                        game={game}
                        today={today}
                        details={(*details).clone()}
                        loading={*details_loading}
                        flash={(*detail_flash).clone()}
                        decks={(*decks).clone()}
                        on_details={on_details}
                        on_outcome={on_outcome}
                        on_flash={on_detail_flash}
                        on_unregister={ask(Pending::Unregister)}
                        on_cancel_game={ask(Pending::CancelGame)}
                    />
                } else {
                    <article><p>{ t("games.select_prompt") }</p></article>
                }
            </div>
            <ConfirmDialog
                open={pending.is_some()}
                title={confirm_title}
                message={confirm_message}
                on_confirm={on_confirm}
                on_cancel={dismiss}
                busy={*busy}
            />
        </section>
    }
}
