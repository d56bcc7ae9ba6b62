use crate::components::admin_dialogs::ResetPasswordDialog;
use crate::components::avatar::Avatar;
use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::hooks::{use_admin_gate, use_request_sequence};
use crate::i18n::{fmt_datetime, t};
use magmon_core::actions::admin;
use magmon_core::model::{AdminUser, TempPassword};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct UserRowProps {
    pub user: AdminUser,
    /// The signed-in admin cannot demote themselves.
    #[prop_or_default]
    pub is_self: bool,
    #[prop_or_default]
    pub busy: bool,
    pub on_reset: Callback<AdminUser>,
    pub on_toggle_admin: Callback<AdminUser>,
}

#[function_component(UserRow)]
pub fn user_row(props: &UserRowProps) -> Html {
    let user = &props.user;
    let on_reset = {
        let (cb, user) = (props.on_reset.clone(), user.clone());
        Callback::from(move |_: MouseEvent| cb.emit(user.clone()))
    };
    let on_toggle = {
        let (cb, user) = (props.on_toggle_admin.clone(), user.clone());
        Callback::from(move |_: MouseEvent| cb.emit(user.clone()))
    };
    let last_login = user
        .last_login
        .as_deref()
        .map_or_else(|| t("admin.never"), fmt_datetime);

    html! {
        <article class="user-row">
            <Avatar url={user.avatar_url.clone()} alt={AttrValue::from(format!("{}'s avatar", user.username))} size={40} />
            <div class="user-row__info">
                <strong>{ user.username.clone() }</strong>
                if user.is_admin {
                    <span class="badge">{ t("admin.badge") }</span>
                }
                if user.must_change_password {
                    <span class="badge badge--warn">{ t("admin.password_pending") }</span>
                }
                <br />
                <small>{ user.email.clone().unwrap_or_default() }</small>
            </div>
            <div class="user-row__actions">
                <small>{ format!("{}: {}", t("admin.last_login"), last_login) }</small>
                <br />
                <button
                    type="button"
                    id={format!("reset-{}", user.id)}
                    class="outline"
                    disabled={props.busy}
                    onclick={on_reset}
                >
                    { t("admin.reset_title") }
                </button>
                if !props.is_self {
                    <button type="button" class="outline secondary" disabled={props.busy} onclick={on_toggle}>
                        { if user.is_admin { t("admin.revoke") } else { t("admin.grant") } }
                    </button>
                }
            </div>
        </article>
    }
}

#[function_component(AdminUsersPage)]
pub fn admin_users_page() -> Html {
    let ctx = use_app_context();
    let allowed = use_admin_gate();
    let seq = use_request_sequence();
    let users = use_state(Vec::<AdminUser>::new);
    let loading = use_state(|| true);
    let flash = use_state(|| None::<Flash>);
    let toggling = use_state(|| None::<i64>);

    let resetting = use_state(|| None::<AdminUser>);
    let issued = use_state(|| None::<TempPassword>);
    let reset_busy = use_state(|| false);
    let reset_flash = use_state(|| None::<Flash>);

    {
        let api = Rc::clone(&ctx.api);
        let (users, loading, flash) = (users.clone(), loading.clone(), flash.clone());
        use_effect_with(allowed, move |&allowed| {
            if allowed {
                let ticket = seq.issue();
                spawn_local(async move {
                    let result = admin::load_users(&api).await;
                    if !seq.is_current(ticket) {
                        return;
                    }
                    loading.set(false);
                    match result {
                        Ok(list) => users.set(list),
                        Err(err) => flash.set(Some(Flash::failure("errors.users_load", &err))),
                    }
                });
            }
            || {}
        });
    }

    let on_reset = {
        let (resetting, issued) = (resetting.clone(), issued.clone());
        let reset_flash = reset_flash.clone();
        Callback::from(move |user: AdminUser| {
            issued.set(None);
            reset_flash.set(None);
            resetting.set(Some(user));
        })
    };
    let close_reset = {
        let (resetting, issued) = (resetting.clone(), issued.clone());
        Callback::from(move |()| {
            resetting.set(None);
            issued.set(None);
        })
    };
    let confirm_reset = {
        let api = Rc::clone(&ctx.api);
        let (resetting, issued, reset_busy, reset_flash) = (
            resetting.clone(),
            issued.clone(),
            reset_busy.clone(),
            reset_flash.clone(),
        );
        Callback::from(move |()| {
            let Some(user_id) = resetting.as_ref().map(|u| u.id) else {
                return;
            };
            let api = Rc::clone(&api);
            let (issued, reset_busy, reset_flash) =
                (issued.clone(), reset_busy.clone(), reset_flash.clone());
            reset_busy.set(true);
            spawn_local(async move {
                let result = admin::reset_password(&api, user_id).await;
                reset_busy.set(false);
                match result {
                    Ok(temp) => issued.set(Some(temp)),
                    Err(err) => {
                        reset_flash.set(Some(Flash::failure("errors.password_reset", &err)));
                    }
                }
            });
        })
    };
    let on_toggle_admin = {
        let api = Rc::clone(&ctx.api);
        let (users, flash, toggling) = (users.clone(), flash.clone(), toggling.clone());
        Callback::from(move |user: AdminUser| {
            let api = Rc::clone(&api);
            let (users, flash, toggling) = (users.clone(), flash.clone(), toggling.clone());
            toggling.set(Some(user.id));
            spawn_local(async move {
                let result = admin::toggle_admin(&api, user.id).await;
                toggling.set(None);
                match result {
                    Ok(list) => {
                        flash.set(None);
                        users.set(list);
                    }
                    Err(err) => flash.set(Some(Flash::failure("errors.toggle_admin", &err))),
                }
            });
        })
    };

    if !allowed || *loading {
        return html! { <p aria-busy="true">{ t("admin.loading_users") }</p> };
    }

    let self_id = ctx.user_id();
    html! {
        <section class="admin-users">
            <header>
                <h2>{ t("admin.users_title") }</h2>
            </header>
            <StatusLine flash={(*flash).clone()} />
            { for users.iter().map(|user| html! {
                <UserRow
                    key={user.id}
                    user={user.clone()}
                    is_self={user.id == self_id}
                    busy={*toggling == Some(user.id)}
                    on_reset={on_reset.clone()}
                    on_toggle_admin={on_toggle_admin.clone()}
                />
            }) }
            <ResetPasswordDialog
                open={resetting.is_some()}
                username={resetting.as_ref().map(|u| u.username.clone()).unwrap_or_default()}
                issued={(*issued).clone()}
                busy={*reset_busy}
                flash={(*reset_flash).clone()}
                on_confirm={confirm_reset}
                on_close={close_reset}
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn admin_user(is_admin: bool) -> AdminUser {
        AdminUser {
            id: 9,
            username: "vell".into(),
            email: Some("vell@example.com".into()),
            avatar_url: None,
            must_change_password: true,
            last_login: None,
            is_admin,
        }
    }

    fn render(user: AdminUser, is_self: bool) -> String {
        block_on(
            LocalServerRenderer::<UserRow>::with_props(UserRowProps {
                user,
                is_self,
                busy: false,
                on_reset: Callback::noop(),
                on_toggle_admin: Callback::noop(),
            })
            .render(),
        )
    }

    #[test]
    fn row_shows_flags_and_last_login() {
        let html = render(admin_user(true), false);
        assert!(html.contains("vell@example.com"));
        assert!(html.contains("Admin"));
        assert!(html.contains("Never"));
        assert!(html.contains("Revoke admin"));
    }

    #[test]
    fn own_row_has_no_admin_toggle() {
        let html = render(admin_user(true), true);
        assert!(!html.contains("Revoke admin"));
        assert!(html.contains("Reset Password"));
    }
}
