use crate::components::avatar::Avatar;
use crate::components::deck_view::DeckView;
use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::hooks::{use_deck_viewer, use_request_sequence};
use crate::i18n::{t, tr};
use magmon_core::actions::profile;
use magmon_core::display_colors;
use magmon_core::model::{Deck, PlayerProfile};
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PlayerCardProps {
    pub player: PlayerProfile,
}

#[function_component(PlayerCard)]
pub fn player_card(props: &PlayerCardProps) -> Html {
    let player = &props.player;
    let wins = player.stats.total_wins.to_string();
    let mut args = BTreeMap::new();
    args.insert("count", wins.as_str());
    let or_na = |value: &Option<String>| {
        value
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| t("common.na"))
    };
    html! {
        <header class="player-card">
            <Avatar url={player.avatar_url.clone()} alt={AttrValue::from(format!("{} avatar", player.username))} size={80} />
            <hgroup>
                <h2>{ player.username.clone() }</h2>
                <p><small>{ tr("players.wins", Some(&args)) }</small></p>
            </hgroup>
            <p><strong>{ format!("{}: ", t("profile.favorite_color")) }</strong>{ or_na(&player.favorite_color) }</p>
            <p><strong>{ format!("{}: ", t("profile.retirement_plane")) }</strong>{ or_na(&player.retirement_plane) }</p>
        </header>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub user_id: i64,
}

#[function_component(PlayerDetailPage)]
pub fn player_detail_page(props: &Props) -> Html {
    let ctx = use_app_context();
    let seq = use_request_sequence();
    let viewer = use_deck_viewer();
    let loaded = use_state(|| None::<(PlayerProfile, Vec<Deck>)>);
    let loading = use_state(|| true);
    let flash = use_state(|| None::<Flash>);

    {
        let api = Rc::clone(&ctx.api);
        let (loaded, loading, flash) = (loaded.clone(), loading.clone(), flash.clone());
        let close = viewer.close.clone();
        use_effect_with(props.user_id, move |&user_id| {
            let ticket = seq.issue();
            loading.set(true);
            close.emit(());
            spawn_local(async move {
                let result = profile::load_player(&api, user_id).await;
                if !seq.is_current(ticket) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(pair) => {
                        flash.set(None);
                        loaded.set(Some(pair));
                    }
                    Err(err) => {
                        loaded.set(None);
                        flash.set(Some(Flash::failure("errors.player_load", &err)));
                    }
                }
            });
            || {}
        });
    }

    if *loading {
        return html! { <p aria-busy="true">{ t("players.loading_one") }</p> };
    }
    let Some((player, decks)) = (*loaded).clone() else {
        return html! {
            <StatusLine flash={(*flash).clone().or_else(|| Some(Flash::Info(t("players.not_found"))))} />
        };
    };

    let deck_rows = decks.iter().map(|deck| {
        let open = viewer.is_open(deck.id);
        let onclick = {
            let (open_cb, close) = (viewer.open.clone(), viewer.close.clone());
            let deck_id = deck.id;
            Callback::from(move |_: MouseEvent| {
                if open {
                    close.emit(());
                } else {
                    open_cb.emit((deck_id, None));
                }
            })
        };
        html! {
            <tr key={deck.id} class={classes!(open.then_some("selected"))}>
                <td>{ deck.name.clone() }</td>
                <td>{ deck.commander.clone() }</td>
                <td>{ display_colors(&deck.colors) }</td>
                <td>
                    <button
                        type="button"
                        class="outline secondary small"
                        aria-pressed={open.to_string()}
                        disabled={open && viewer.state.loading}
                        {onclick}
                    >
                        { if open { t("common.hide") } else { t("common.view") } }
                    </button>
                </td>
            </tr>
        }
    });

    html! {
        <article class="player-detail">
            <PlayerCard player={player} />
            <div class="grid">
                <section>
                    <h6>{ t("decks.title") }</h6>
                    if decks.is_empty() {
                        <p><i>{ t("players.no_decks") }</i></p>
                    } else {
                        <table role="grid">
                            <thead>
                                <tr>
                                    <th scope="col">{ t("decks.name") }</th>
                                    <th scope="col">{ t("decks.commander") }</th>
                                    <th scope="col">{ t("decks.colors") }</th>
                                    <th scope="col">{ t("decks.actions") }</th>
                                </tr>
                            </thead>
                            <tbody>{ for deck_rows }</tbody>
                        </table>
                    }
                </section>
                <section>
                    <h6>{ t("players.deck_details") }</h6>
                    <StatusLine flash={viewer.state.flash.clone()} />
                    if viewer.state.loading {
                        <p aria-busy="true">{ t("decks.loading_details") }</p>
                    } else if let Some(snapshot) = viewer.state.snapshot.clone() {
                        <DeckView
                            snapshot={snapshot}
                            on_select_version={viewer.select_version.clone()}
                            version_loading={viewer.state.version_loading}
                            version_flash={viewer.state.version_flash.clone()}
                        />
                    } else if viewer.state.deck_id.is_none() {
                        <p><i>{ t("players.select_deck") }</i></p>
                    }
                </section>
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use magmon_core::model::PlayerStats;
    use yew::LocalServerRenderer;

    #[test]
    fn card_fills_missing_profile_fields() {
        let player = PlayerProfile {
            id: 5,
            username: "Kess".into(),
            avatar_url: None,
            favorite_color: Some("Blue".into()),
            retirement_plane: None,
            stats: PlayerStats { total_wins: 4 },
        };
        let html = block_on(
            LocalServerRenderer::<PlayerCard>::with_props(PlayerCardProps { player }).render(),
        );
        assert!(html.contains("Kess"));
        assert!(html.contains("Wins: 4"));
        assert!(html.contains("Blue"));
        assert!(html.contains("N/A"));
    }
}
