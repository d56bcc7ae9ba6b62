use crate::components::status::Flash;
use crate::context::use_app_context;
use crate::i18n::t;
use magmon_core::actions::{ResultForm, ReviewOutcome, games};
use magmon_core::games::{MIN_PLAYERS, placement_options};
use magmon_core::model::Registration;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub game_id: i64,
    pub registrations: Vec<Registration>,
    pub on_submitted: Callback<ReviewOutcome>,
    pub on_cancel: Callback<()>,
    pub on_flash: Callback<Flash>,
}

fn text_field(
    form: &UseStateHandle<ResultForm>,
    textarea: bool,
    apply: fn(&mut ResultForm, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let value = if textarea {
            e.target_unchecked_into::<HtmlTextAreaElement>().value()
        } else {
            e.target_unchecked_into::<HtmlInputElement>().value()
        };
        let mut next = (*form).clone();
        apply(&mut next, value);
        form.set(next);
    })
}

/// Placements, times and notes for a finished game.
#[function_component(ResultsForm)]
pub fn results_form(props: &Props) -> Html {
    let ctx = use_app_context();
    let form = use_state(|| ResultForm::for_registrations(&props.registrations));
    let busy = use_state(|| false);

    {
        let form = form.clone();
        use_effect_with(props.registrations.clone(), move |registrations| {
            form.set(ResultForm::for_registrations(registrations));
            || {}
        });
    }

    let on_submit = {
        let api = Rc::clone(&ctx.api);
        let submitter = ctx.user_id();
        let game_id = props.game_id;
        let form = form.clone();
        let busy = busy.clone();
        let (on_submitted, on_flash) = (props.on_submitted.clone(), props.on_flash.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let submitted = (*form).clone();
            let api = Rc::clone(&api);
            let busy = busy.clone();
            let (on_submitted, on_flash) = (on_submitted.clone(), on_flash.clone());
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = games::submit_result(&api, submitter, game_id, &submitted).await;
                busy.set(false);
                match result {
                    Ok(outcome) => {
                        on_submitted.emit(outcome);
                        on_flash.emit(Flash::Success(t("games.submitted")));
                    }
                    Err(err) => on_flash.emit(Flash::failure("errors.submission", &err)),
                }
            });
        })
    };
    let on_cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let options = placement_options(props.registrations.len());
    let too_few = props.registrations.len() < MIN_PLAYERS;

    html! {
        <form class="results-form" onsubmit={on_submit}>
            <h5>{ t("games.submit_title") }</h5>
            <h6>{ t("games.placements") }</h6>
            if too_few {
                <p><small>{ t("games.need_two") }</small></p>
            } else {
                <table>
                    <thead>
                        <tr>
                            <th scope="col">{ t("games.player") }</th>
                            <th scope="col">{ t("games.deck") }</th>
                            <th scope="col">{ t("games.placement") }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for props.registrations.iter().map(|reg| {
                            let user_id = reg.user_id;
                            let current = form
                                .placement_of(user_id)
                                .map(|p| p.to_string())
                                .unwrap_or_default();
                            let onchange = {
                                let form = form.clone();
                                Callback::from(move |e: Event| {
                                    let select = e.target_unchecked_into::<HtmlSelectElement>();
                                    let raw = select.value();
                                    let mut next = (*form).clone();
                                    next.set_placement(user_id, raw.parse::<u32>().ok());
                                    form.set(next);
                                })
                            };
                            html! {
                                <tr key={reg.registration_id}>
                                    <td>{ reg.username.clone() }</td>
                                    <td>{ reg.deck_name.clone() }</td>
                                    <td>
                                        <select
                                            required=true
                                            {onchange}
                                            aria-label={format!("{} {}", t("games.placement"), reg.username)}
                                        >
                                            <option value="" disabled=true selected={current.is_empty()}>
                                                { t("games.choose_place") }
                                            </option>
                                            { for options.iter().map(|p| {
                                                let value = p.to_string();
                                                let selected = value == current;
                                                html! { <option value={value.clone()} {selected}>{ value }</option> }
                                            }) }
                                        </select>
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            }
            <div class="grid">
                <div>
                    <label for="result-start">{ t("games.start_time") }</label>
                    <input id="result-start" type="datetime-local" value={form.start_time.clone()}
                        oninput={text_field(&form, false, |f, v| f.start_time = v)} />
                </div>
                <div>
                    <label for="result-end">{ t("games.end_time") }</label>
                    <input id="result-end" type="datetime-local" value={form.end_time.clone()}
                        oninput={text_field(&form, false, |f, v| f.end_time = v)} />
                </div>
            </div>
            <fieldset>
                <legend>{ t("games.game_notes") }</legend>
                <label for="notes-interaction">{ t("games.big_interaction") }</label>
                <textarea id="notes-interaction" rows="2" value={form.notes_big_interaction.clone()}
                    oninput={text_field(&form, true, |f, v| f.notes_big_interaction = v)} />
                <label for="notes-rules">{ t("games.rules_discussion") }</label>
                <textarea id="notes-rules" rows="2" value={form.notes_rules_discussion.clone()}
                    oninput={text_field(&form, true, |f, v| f.notes_rules_discussion = v)} />
                <label for="notes-summary">{ t("games.end_summary") }</label>
                <textarea id="notes-summary" rows="2" value={form.notes_end_summary.clone()}
                    oninput={text_field(&form, true, |f, v| f.notes_end_summary = v)} />
            </fieldset>
            <div class="form-actions">
                <button type="submit" disabled={*busy || too_few} aria-busy={busy.to_string()}>{ t("games.submit_result") }</button>
                <button type="button" class="secondary" onclick={on_cancel} disabled={*busy}>{ t("common.cancel") }</button>
            </div>
        </form>
    }
}
