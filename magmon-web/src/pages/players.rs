use crate::components::avatar::Avatar;
use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::hooks::use_request_sequence;
use crate::i18n::{t, tr};
use crate::router::Route;
use magmon_core::actions::profile;
use magmon_core::model::PlayerSummary;
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PlayerGridProps {
    pub players: Vec<PlayerSummary>,
}

/// Two-column grid of player tiles.
#[function_component(PlayerGrid)]
pub fn player_grid(props: &PlayerGridProps) -> Html {
    if props.players.is_empty() {
        return html! { <p>{ t("players.none") }</p> };
    }
    html! {
        <div class="grid two-columns">
            { for props.players.iter().map(|player| {
                let wins = player.stats.total_wins.to_string();
                let mut args = BTreeMap::new();
                args.insert("count", wins.as_str());
                html! {
                    <article key={player.id} class="player-tile">
                        <Avatar url={player.avatar_url.clone()} alt={AttrValue::from(format!("{} avatar", player.username))} size={64} />
                        <div class="player-tile-info">
                            <h5>
                                <Link<Route> to={Route::PlayerDetail { user_id: player.id }}>
                                    { player.username.clone() }
                                </Link<Route>>
                            </h5>
                            <p><small>{ tr("players.wins", Some(&args)) }</small></p>
                        </div>
                    </article>
                }
            }) }
        </div>
    }
}

#[function_component(PlayersPage)]
pub fn players_page() -> Html {
    let ctx = use_app_context();
    let seq = use_request_sequence();
    let players = use_state(Vec::<PlayerSummary>::new);
    let loading = use_state(|| true);
    let flash = use_state(|| None::<Flash>);

    {
        let api = Rc::clone(&ctx.api);
        let (players, loading, flash) = (players.clone(), loading.clone(), flash.clone());
        use_effect_with((), move |()| {
            let ticket = seq.issue();
            spawn_local(async move {
                let result = profile::load_players(&api).await;
                if !seq.is_current(ticket) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(list) => players.set(list),
                    Err(err) => {
                        players.set(Vec::new());
                        flash.set(Some(Flash::failure("errors.players_load", &err)));
                    }
                }
            });
            || {}
        });
    }

    if *loading {
        return html! { <p aria-busy="true">{ t("players.loading") }</p> };
    }
    if flash.is_some() {
        return html! { <StatusLine flash={(*flash).clone()} /> };
    }
    html! {
        <section class="players-page">
            <h3>{ t("players.title") }</h3>
            <PlayerGrid players={(*players).clone()} />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use magmon_core::model::PlayerStats;
    use yew::LocalServerRenderer;
    use yew_router::history::{AnyHistory, MemoryHistory};

    #[function_component(Harness)]
    fn harness() -> Html {
        let players = vec![
            PlayerSummary {
                id: 1,
                username: "Ana".into(),
                avatar_url: Some("/static/avatars/1.png".into()),
                stats: PlayerStats { total_wins: 3 },
            },
            PlayerSummary {
                id: 2,
                username: "Bo".into(),
                avatar_url: None,
                stats: PlayerStats::default(),
            },
        ];
        html! {
            <Router history={AnyHistory::from(MemoryHistory::new())}>
                <PlayerGrid players={players} />
            </Router>
        }
    }

    #[test]
    fn tiles_show_links_and_wins() {
        let html = block_on(LocalServerRenderer::<Harness>::new().render());
        assert!(html.contains("href=\"/players/1\""), "{html}");
        assert!(html.contains("href=\"/players/2\""));
        assert!(html.contains("Wins: 3"));
        assert!(html.contains("Wins: 0"));
        assert!(html.contains("/static/avatars/1.png"));
    }

    #[test]
    fn empty_grid_reports_no_players() {
        let html = block_on(
            LocalServerRenderer::<PlayerGrid>::with_props(PlayerGridProps { players: Vec::new() })
                .render(),
        );
        assert!(html.contains("No players found."));
    }
}
