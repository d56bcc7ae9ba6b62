use crate::components::avatar::Avatar;
use crate::context::use_app_context;
use crate::i18n::{t, tr};
use crate::router::Route;
use magmon_core::actions::auth;
use std::collections::BTreeMap;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_change_password: Callback<()>,
}

/// Top bar for signed-in users.
#[function_component(Nav)]
pub fn nav(props: &Props) -> Html {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let route = use_route::<Route>();
    let Some(user) = ctx.user.clone() else {
        return Html::default();
    };

    let on_logout = {
        let api = ctx.api.clone();
        Callback::from(move |_: MouseEvent| {
            auth::logout(&api);
            if let Some(nav) = navigator.as_ref() {
                nav.push(&Route::Login);
            }
        })
    };
    let on_change_password = {
        let cb = props.on_change_password.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let item = |to: Route, key: &str| {
        let current = route.as_ref() == Some(&to);
        html! {
            <li>
                <Link<Route> to={to} classes={classes!(current.then_some("active"))}>{ t(key) }</Link<Route>>
            </li>
        }
    };

    let mut args = BTreeMap::new();
    args.insert("name", user.username.as_str());

    html! {
        <nav class="top-nav" aria-label={t("nav.main")}>
            <ul>
                <li><strong class="brand">{ t("nav.brand") }</strong></li>
            </ul>
            <ul>
                { item(Route::Home, "nav.dashboard") }
                { item(Route::Games, "nav.games") }
                { item(Route::Decks, "nav.decks") }
                { item(Route::Players, "nav.players") }
                if user.is_admin {
                    <>
                        { item(Route::AdminUsers, "nav.admin_users") }
                        { item(Route::AdminGames, "nav.admin_games") }
                    </>
                }
            </ul>
            <ul>
                <li class="nav-user">
                    <Avatar url={user.avatar_url.clone()} alt={user.username.clone()} size={32} />
                    <span>{ tr("nav.welcome", Some(&args)) }</span>
                </li>
                { item(Route::Profile, "nav.profile") }
                <li><button type="button" class="link" onclick={on_change_password}>{ t("nav.change_password") }</button></li>
                <li><button type="button" class="link" onclick={on_logout}>{ t("nav.logout") }</button></li>
            </ul>
        </nav>
    }
}
