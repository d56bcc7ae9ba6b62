//! Application root: context, session tracking, layout and route guard.

use crate::components::change_password_modal::ChangePasswordModal;
use crate::components::nav::Nav;
use crate::context::AppContext;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod guard;

pub use guard::RouteGuard;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppRoot />
        </BrowserRouter>
    }
}

/// Everything below the router. Owns the [`AppContext`] and keeps its user in
/// step with the session store.
#[function_component(AppRoot)]
pub fn app_root() -> Html {
    let base = use_memo((), |()| AppContext::from_build_env());
    let user = use_state(|| base.user.clone());
    let navigator = use_navigator();

    {
        let api = std::rc::Rc::clone(&base.api);
        let user = user.clone();
        use_effect_with((), move |()| {
            let id = api.session().subscribe(move |current| user.set(current.cloned()));
            move || api.session().unsubscribe(id)
        });
    }
    {
        let api = std::rc::Rc::clone(&base.api);
        use_effect_with((), move |()| {
            api.set_unauthorized_handler(move || {
                if let Some(nav) = navigator.as_ref() {
                    nav.push(&Route::Login);
                }
            });
            || {}
        });
    }

    let context = base.with_user((*user).clone());
    html! {
        <ContextProvider<AppContext> context={context}>
            <style>{ crate::a11y::visible_focus_css() }</style>
            <Layout />
        </ContextProvider<AppContext>>
    }
}

/// Navigation bar, the password dialogs and the routed page.
#[function_component(Layout)]
pub fn layout() -> Html {
    let ctx = crate::context::use_app_context();
    let show_password = use_state(|| false);
    let forced = ctx
        .user
        .as_ref()
        .is_some_and(|u| u.must_change_password);

    let open_password = {
        let show_password = show_password.clone();
        Callback::from(move |()| show_password.set(true))
    };
    let close_password = {
        let show_password = show_password.clone();
        Callback::from(move |()| show_password.set(false))
    };

    html! {
        <>
            <a href="#main" class="sr-only">{ crate::i18n::t("nav.skip_to_content") }</a>
            if ctx.user.is_some() {
                <Nav on_change_password={open_password} />
            }
            <main id="main" class="container">
                <Switch<Route> render={switch} />
            </main>
            <ChangePasswordModal
                open={forced || *show_password}
                forced={forced}
                on_close={close_password}
            />
        </>
    }
}

fn switch(route: Route) -> Html {
    html! { <RouteGuard route={route} /> }
}
