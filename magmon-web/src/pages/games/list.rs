use crate::i18n::{fmt_date, t};
use crate::router::Route;
use chrono::NaiveDate;
use magmon_core::display_status;
use magmon_core::model::Game;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub games: Vec<Game>,
    pub selected: Option<i64>,
    pub today: NaiveDate,
    pub on_select: Callback<i64>,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(GameList)]
pub fn game_list(props: &Props) -> Html {
    if props.games.is_empty() {
        return if props.loading {
            html! { <p aria-busy="true">{ t("common.loading") }</p> }
        } else {
            html! { <p>{ t("games.none") }</p> }
        };
    }

    html! {
        <div class="scroll-y">
            <table class="games-table">
                <thead>
                    <tr>
                        <th scope="col">{ t("games.date") }</th>
                        <th scope="col">{ t("games.status") }</th>
                        <th scope="col">{ t("games.players") }</th>
                        <th scope="col">{ t("games.winner") }</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.games.iter().map(|game| {
                        let selected = props.selected == Some(game.id);
                        let onclick = {
                            let cb = props.on_select.clone();
                            let id = game.id;
                            Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                cb.emit(id);
                            })
                        };
                        let winner = match (game.winner_id, game.winner_username.clone()) {
                            (Some(user_id), name) => html! {
                                <Link<Route> to={Route::PlayerDetail { user_id }}>
                                    { name.unwrap_or_else(|| format!("{} {user_id}", t("common.user"))) }
                                </Link<Route>>
                            },
                            (None, _) => html! { "-" },
                        };
                        html! {
                            <tr key={game.id} class={classes!(selected.then_some("selected-row"))}>
                                <td>
                                    <a href="#" {onclick} aria-pressed={selected.to_string()}
                                        class={classes!(selected.then_some("contrast"))}>
                                        { fmt_date(&game.game_date) }
                                    </a>
                                </td>
                                <td>{ display_status(game, props.today).label() }</td>
                                <td>{ game.registration_count.to_string() }</td>
                                <td>{ winner }</td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        </div>
    }
}
