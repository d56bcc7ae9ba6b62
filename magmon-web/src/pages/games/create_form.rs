use crate::components::status::Flash;
use crate::context::use_app_context;
use crate::i18n::t;
use crate::pages::{bind_input, bind_textarea};
use magmon_core::actions::{GameForm, games};
use magmon_core::model::Game;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Refreshed game list after a successful create.
    pub on_created: Callback<Vec<Game>>,
    pub on_flash: Callback<Flash>,
}

#[function_component(GameCreateForm)]
pub fn game_create_form(props: &Props) -> Html {
    let ctx = use_app_context();
    let date = use_state(String::new);
    let is_pauper = use_state(|| false);
    let details = use_state(String::new);
    let busy = use_state(|| false);

    let on_pauper = {
        let is_pauper = is_pauper.clone();
        Callback::from(move |e: Event| {
            is_pauper.set(e.target_unchecked_into::<HtmlInputElement>().checked());
        })
    };

    let on_submit = {
        let api = Rc::clone(&ctx.api);
        let (date, is_pauper, details, busy) =
            (date.clone(), is_pauper.clone(), details.clone(), busy.clone());
        let on_created = props.on_created.clone();
        let on_flash = props.on_flash.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = GameForm {
                game_date: (*date).clone(),
                is_pauper: *is_pauper,
                details: (*details).clone(),
            };
            let api = Rc::clone(&api);
            let (date, is_pauper, details, busy) =
                (date.clone(), is_pauper.clone(), details.clone(), busy.clone());
            let (on_created, on_flash) = (on_created.clone(), on_flash.clone());
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = games::create_game(&api, &form).await;
                busy.set(false);
                match result {
                    Ok(list) => {
                        date.set(String::new());
                        is_pauper.set(false);
                        details.set(String::new());
                        on_created.emit(list);
                        on_flash.emit(Flash::Success(t("games.created")));
                    }
                    Err(err) => on_flash.emit(Flash::failure("errors.game_create", &err)),
                }
            });
        })
    };

    html! {
        <form class="game-create" onsubmit={on_submit}>
            <h4>{ t("games.create_title") }</h4>
            <div class="form-grid">
                <label for="create-date">{ t("games.date") }</label>
                <input id="create-date" type="date" required=true value={(*date).clone()} oninput={bind_input(&date)} />
                <label for="create-pauper">{ t("games.pauper") }</label>
                <input id="create-pauper" type="checkbox" role="switch" checked={*is_pauper} onchange={on_pauper} />
                <label for="create-details">{ t("games.notes") }</label>
                <textarea id="create-details" rows="2" value={(*details).clone()} oninput={bind_textarea(&details)} />
            </div>
            <button type="submit" disabled={*busy} aria-busy={busy.to_string()}>{ t("games.create") }</button>
        </form>
    }
}
