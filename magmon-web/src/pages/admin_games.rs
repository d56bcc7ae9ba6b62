use crate::components::admin_dialogs::{AuditLogDialog, DeleteGameDialog};
use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::hooks::{use_admin_gate, use_request_sequence};
use crate::i18n::{fmt_date, fmt_datetime, t, tr};
use magmon_core::actions::admin;
use magmon_core::model::{AuditLogEntry, DeletedGame, Game};
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// "Game 12"
pub fn game_label(game_id: i64) -> String {
    let id = game_id.to_string();
    let mut args = BTreeMap::new();
    args.insert("id", id.as_str());
    tr("admin.game_label", Some(&args))
}

fn deleted_note(game: &DeletedGame) -> String {
    let by = game
        .deleted_by
        .as_ref()
        .and_then(|admin| admin.username.clone())
        .unwrap_or_else(|| t("common.unknown"));
    let at = game.deleted_at.as_deref().map(fmt_datetime).unwrap_or_default();
    let mut args = BTreeMap::new();
    args.insert("name", by.as_str());
    args.insert("when", at.as_str());
    tr("admin.deleted_by", Some(&args))
}

#[derive(Properties, PartialEq, Clone)]
pub struct GameRowsProps {
    pub active: Vec<Game>,
    pub deleted: Vec<DeletedGame>,
    #[prop_or_default]
    pub busy: Option<i64>,
    pub on_history: Callback<i64>,
    pub on_delete: Callback<i64>,
    pub on_restore: Callback<i64>,
}

#[function_component(GameRows)]
pub fn game_rows(props: &GameRowsProps) -> Html {
    let id_button = |cb: &Callback<i64>, id: i64, label: String, class: &'static str| {
        let cb = cb.clone();
        html! {
            <button
                type="button"
                id={format!("{class}-{id}")}
                class="outline"
                disabled={props.busy == Some(id)}
                onclick={Callback::from(move |_: MouseEvent| cb.emit(id))}
            >
                { label }
            </button>
        }
    };

    html! {
        <>
            <section>
                <h3>{ t("admin.active_games") }</h3>
                if props.active.is_empty() {
                    <p><i>{ t("games.none") }</i></p>
                }
                { for props.active.iter().map(|game| html! {
                    <article key={game.id} class="admin-game">
                        <div>
                            <strong>{ game_label(game.id) }</strong>
                            <br />
                            <small>{ fmt_date(&game.game_date) }</small>
                        </div>
                        <div class="row-actions">
                            { id_button(&props.on_history, game.id, t("admin.view_history"), "history") }
                            { id_button(&props.on_delete, game.id, t("admin.delete"), "delete") }
                        </div>
                    </article>
                }) }
            </section>
            <section>
                <h3>{ t("admin.deleted_games") }</h3>
                if props.deleted.is_empty() {
                    <p><i>{ t("admin.no_deleted") }</i></p>
                }
                { for props.deleted.iter().map(|game| html! {
                    <article key={game.id} class="admin-game admin-game--deleted">
                        <div>
                            <strong>{ game_label(game.id) }</strong>
                            <br />
                            <small>{ fmt_date(&game.game_date) }</small>
                            <br />
                            <small>{ deleted_note(game) }</small>
                        </div>
                        <div class="row-actions">
                            { id_button(&props.on_history, game.id, t("admin.view_history"), "history") }
                            { id_button(&props.on_restore, game.id, t("admin.restore"), "restore") }
                        </div>
                    </article>
                }) }
            </section>
        </>
    }
}

#[function_component(AdminGamesPage)]
pub fn admin_games_page() -> Html {
    let ctx = use_app_context();
    let allowed = use_admin_gate();
    let seq = use_request_sequence();
    let audit_seq = use_request_sequence();
    let lists = use_state(|| (Vec::<Game>::new(), Vec::<DeletedGame>::new()));
    let loading = use_state(|| true);
    let flash = use_state(|| None::<Flash>);
    let busy = use_state(|| None::<i64>);

    let deleting = use_state(|| None::<i64>);
    let delete_busy = use_state(|| false);
    let delete_flash = use_state(|| None::<Flash>);

    let audit_game = use_state(|| None::<i64>);
    let audit_entries = use_state(Vec::<AuditLogEntry>::new);
    let audit_loading = use_state(|| false);
    let audit_flash = use_state(|| None::<Flash>);

    {
        let api = Rc::clone(&ctx.api);
        let (lists, loading, flash) = (lists.clone(), loading.clone(), flash.clone());
        use_effect_with(allowed, move |&allowed| {
            if allowed {
                let ticket = seq.issue();
                spawn_local(async move {
                    let result = admin::load_game_lists(&api).await;
                    if !seq.is_current(ticket) {
                        return;
                    }
                    loading.set(false);
                    match result {
                        Ok(pair) => lists.set(pair),
                        Err(err) => flash.set(Some(Flash::failure("errors.games_load", &err))),
                    }
                });
            }
            || {}
        });
    }

    let on_delete = {
        let (deleting, delete_flash) = (deleting.clone(), delete_flash.clone());
        Callback::from(move |game_id: i64| {
            delete_flash.set(None);
            deleting.set(Some(game_id));
        })
    };
    let close_delete = {
        let deleting = deleting.clone();
        Callback::from(move |()| deleting.set(None))
    };
    let confirm_delete = {
        let api = Rc::clone(&ctx.api);
        let (deleting, delete_busy, delete_flash, lists, flash) = (
            deleting.clone(),
            delete_busy.clone(),
            delete_flash.clone(),
            lists.clone(),
            flash.clone(),
        );
        Callback::from(move |reason: String| {
            let Some(game_id) = *deleting else {
                return;
            };
            let api = Rc::clone(&api);
            let (deleting, delete_busy, delete_flash, lists, flash) = (
                deleting.clone(),
                delete_busy.clone(),
                delete_flash.clone(),
                lists.clone(),
                flash.clone(),
            );
            delete_busy.set(true);
            spawn_local(async move {
                let result = admin::delete_game(&api, game_id, &reason).await;
                delete_busy.set(false);
                match result {
                    Ok(pair) => {
                        lists.set(pair);
                        deleting.set(None);
                        flash.set(Some(Flash::Success(t("admin.game_deleted"))));
                    }
                    Err(err) => delete_flash.set(Some(Flash::failure("errors.game_delete", &err))),
                }
            });
        })
    };

    let on_restore = {
        let api = Rc::clone(&ctx.api);
        let (busy, lists, flash) = (busy.clone(), lists.clone(), flash.clone());
        Callback::from(move |game_id: i64| {
            let api = Rc::clone(&api);
            let (busy, lists, flash) = (busy.clone(), lists.clone(), flash.clone());
            busy.set(Some(game_id));
            spawn_local(async move {
                let result = admin::restore_game(&api, game_id).await;
                busy.set(None);
                match result {
                    Ok(pair) => {
                        lists.set(pair);
                        flash.set(Some(Flash::Success(t("admin.game_restored"))));
                    }
                    Err(err) => flash.set(Some(Flash::failure("errors.game_restore", &err))),
                }
            });
        })
    };

    let on_history = {
        let api = Rc::clone(&ctx.api);
        let (audit_game, audit_entries, audit_loading, audit_flash) = (
            audit_game.clone(),
            audit_entries.clone(),
            audit_loading.clone(),
            audit_flash.clone(),
        );
        Callback::from(move |game_id: i64| {
            let ticket = audit_seq.issue();
            let (api, seq) = (Rc::clone(&api), Rc::clone(&audit_seq));
            let (audit_entries, audit_loading, audit_flash) =
                (audit_entries.clone(), audit_loading.clone(), audit_flash.clone());
            audit_game.set(Some(game_id));
            audit_entries.set(Vec::new());
            audit_flash.set(None);
            audit_loading.set(true);
            spawn_local(async move {
                let result = admin::audit_log(&api, game_id).await;
                if !seq.is_current(ticket) {
                    return;
                }
                audit_loading.set(false);
                match result {
                    Ok(entries) => audit_entries.set(entries),
                    Err(err) => audit_flash.set(Some(Flash::failure("errors.audit_load", &err))),
                }
            });
        })
    };
    let close_history = {
        let audit_game = audit_game.clone();
        Callback::from(move |()| audit_game.set(None))
    };

    if !allowed || *loading {
        return html! { <p aria-busy="true">{ t("admin.loading_games") }</p> };
    }

    let (active, deleted) = (*lists).clone();
    html! {
        <section class="admin-games">
            <header>
                <h2>{ t("admin.games_title") }</h2>
            </header>
            <StatusLine flash={(*flash).clone()} />
            <GameRows
                active={active}
                deleted={deleted}
                busy={*busy}
                on_history={on_history}
                on_delete={on_delete}
                on_restore={on_restore}
            />
            <DeleteGameDialog
                open={deleting.is_some()}
                game_label={deleting.map(game_label).unwrap_or_default()}
                busy={*delete_busy}
                flash={(*delete_flash).clone()}
                on_confirm={confirm_delete}
                on_close={close_delete}
            />
            <AuditLogDialog
                open={audit_game.is_some()}
                game_id={audit_game.unwrap_or_default()}
                entries={(*audit_entries).clone()}
                loading={*audit_loading}
                flash={(*audit_flash).clone()}
                on_close={close_history}
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use magmon_core::model::{AdminRef, GameStatus};
    use yew::LocalServerRenderer;

    fn active_game() -> Game {
        Game {
            id: 12,
            game_date: "2025-03-14".into(),
            status: GameStatus::Upcoming,
            is_pauper: false,
            details: None,
            match_id: None,
            match_status: None,
            submitted_by_id: None,
            registration_count: 2,
            winner_id: None,
            winner_username: None,
        }
    }

    #[test]
    fn rows_split_active_and_deleted_games() {
        let html = block_on(
            LocalServerRenderer::<GameRows>::with_props(GameRowsProps {
                active: vec![active_game()],
                deleted: vec![DeletedGame {
                    id: 15,
                    game_date: "2025-02-01".into(),
                    deleted_at: Some("2025-02-02T09:30:00".into()),
                    deleted_by: Some(AdminRef {
                        id: Some(1),
                        username: Some("root".into()),
                    }),
                    last_admin_action: None,
                    last_admin_action_at: None,
                }],
                busy: None,
                on_history: Callback::noop(),
                on_delete: Callback::noop(),
                on_restore: Callback::noop(),
            })
            .render(),
        );
        assert!(html.contains("Game 12"));
        assert!(html.contains("Game 15"));
        assert!(html.contains("id=\"delete-12\""), "{html}");
        assert!(html.contains("id=\"restore-15\""));
        assert!(!html.contains("id=\"restore-12\""));
        assert!(html.contains("Deleted by root"));
    }
}
