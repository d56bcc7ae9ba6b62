use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::i18n::t;
use crate::pages::bind_input;
use crate::router::Route;
use magmon_core::actions::auth;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let busy = use_state(|| false);
    let flash = use_state(|| None::<Flash>);

    let on_submit = {
        let api = Rc::clone(&ctx.api);
        let username = username.clone();
        let password = password.clone();
        let busy = busy.clone();
        let flash = flash.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = Rc::clone(&api);
            let user = (*username).clone();
            let pass = (*password).clone();
            let busy = busy.clone();
            let flash = flash.clone();
            let navigator = navigator.clone();
            busy.set(true);
            flash.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match auth::login(&api, &user, &pass).await {
                    Ok(_) => {
                        if let Some(nav) = navigator.as_ref() {
                            nav.push(&Route::Home);
                        }
                    }
                    Err(err) => {
                        busy.set(false);
                        flash.set(Some(Flash::failure("errors.login", &err)));
                    }
                }
            });
        })
    };

    html! {
        <section class="auth-page">
            <h1>{ t("auth.login_title") }</h1>
            <form onsubmit={on_submit}>
                <label for="login-username">{ t("auth.username") }</label>
                <input id="login-username" type="text" autocomplete="username" required=true
                    value={(*username).clone()} oninput={bind_input(&username)} />
                <label for="login-password">{ t("auth.password") }</label>
                <input id="login-password" type="password" autocomplete="current-password" required=true
                    value={(*password).clone()} oninput={bind_input(&password)} />
                <StatusLine flash={(*flash).clone()} />
                <button type="submit" disabled={*busy} aria-busy={busy.to_string()}>{ t("auth.login") }</button>
            </form>
            <p>
                { t("auth.no_account") }{ " " }
                <Link<Route> to={Route::Register}>{ t("auth.register_link") }</Link<Route>>
            </p>
        </section>
    }
}
