use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::i18n::t;
use crate::pages::bind_input;
use crate::router::Route;
use gloo::timers::future::TimeoutFuture;
use magmon_core::actions::auth;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

/// Delay before a new account is sent to the login page.
pub const REDIRECT_DELAY_MS: u32 = 1_500;

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let busy = use_state(|| false);
    let flash = use_state(|| None::<Flash>);

    let on_submit = {
        let api = Rc::clone(&ctx.api);
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let busy = busy.clone();
        let flash = flash.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = Rc::clone(&api);
            let (user, mail, pass) = ((*username).clone(), (*email).clone(), (*password).clone());
            let (username, email, password) = (username.clone(), email.clone(), password.clone());
            let busy = busy.clone();
            let flash = flash.clone();
            let navigator = navigator.clone();
            busy.set(true);
            flash.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let result = auth::register(&api, &user, &mail, &pass).await;
                busy.set(false);
                match result {
                    Ok(message) => {
                        username.set(String::new());
                        email.set(String::new());
                        password.set(String::new());
                        flash.set(Some(Flash::Success(message)));
                        TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                        if let Some(nav) = navigator.as_ref() {
                            nav.push(&Route::Login);
                        }
                    }
                    Err(err) => flash.set(Some(Flash::failure("errors.registration", &err))),
                }
            });
        })
    };

    html! {
        <section class="auth-page">
            <h1>{ t("auth.register_title") }</h1>
            <form onsubmit={on_submit}>
                <label for="register-username">{ t("auth.username") }</label>
                <input id="register-username" type="text" autocomplete="username" required=true
                    value={(*username).clone()} oninput={bind_input(&username)} />
                <label for="register-email">{ t("auth.email") }</label>
                <input id="register-email" type="email" autocomplete="email" required=true
                    value={(*email).clone()} oninput={bind_input(&email)} />
                <label for="register-password">{ t("auth.password") }</label>
                <input id="register-password" type="password" autocomplete="new-password" required=true
                    value={(*password).clone()} oninput={bind_input(&password)} />
                <StatusLine flash={(*flash).clone()} />
                <button type="submit" disabled={*busy} aria-busy={busy.to_string()}>{ t("auth.register") }</button>
            </form>
            <p>
                { t("auth.have_account") }{ " " }
                <Link<Route> to={Route::Login}>{ t("auth.login_link") }</Link<Route>>
            </p>
        </section>
    }
}
