use crate::components::modal::Modal;
use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::i18n::t;
use magmon_core::actions::auth;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    /// Set while the account is flagged for a mandatory change.
    #[prop_or_default]
    pub forced: bool,
    pub on_close: Callback<()>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Fields {
    current: String,
    new: String,
    confirm: String,
}

fn input_setter(
    fields: &UseStateHandle<Fields>,
    apply: fn(&mut Fields, String),
) -> Callback<InputEvent> {
    let fields = fields.clone();
    Callback::from(move |e: InputEvent| {
        let mut next = (*fields).clone();
        apply(&mut next, e.target_unchecked_into::<HtmlInputElement>().value());
        fields.set(next);
    })
}

/// Password change form. Forced changes cannot be dismissed until they succeed.
#[function_component(ChangePasswordModal)]
pub fn change_password_modal(props: &Props) -> Html {
    let ctx = use_app_context();
    let fields = use_state(Fields::default);
    let busy = use_state(|| false);
    let flash = use_state(|| None::<Flash>);

    let on_submit = {
        let api = Rc::clone(&ctx.api);
        let fields = fields.clone();
        let busy = busy.clone();
        let flash = flash.clone();
        let on_close = props.on_close.clone();
        let forced = props.forced;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            let submitted = (*fields).clone();
            let api = Rc::clone(&api);
            let fields = fields.clone();
            let busy = busy.clone();
            let flash = flash.clone();
            let on_close = on_close.clone();
            busy.set(true);
            flash.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let result = auth::change_password(
                    &api,
                    &submitted.current,
                    &submitted.new,
                    &submitted.confirm,
                )
                .await;
                busy.set(false);
                match result {
                    Ok(message) => {
                        fields.set(Fields::default());
                        flash.set(Some(Flash::Success(message)));
                        if !forced {
                            on_close.emit(());
                        }
                    }
                    Err(err) => flash.set(Some(Flash::failure("errors.password_change", &err))),
                }
            });
        })
    };

    let on_cancel = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let title = if props.forced {
        t("password.forced_title")
    } else {
        t("password.title")
    };
    let description = props.forced.then(|| AttrValue::from(t("password.forced_help")));

    html! {
        <Modal
            open={props.open}
            title={title}
            dismissible={!props.forced}
            description={description}
            on_close={props.on_close.clone()}
        >
            <form onsubmit={on_submit}>
                <label for="pw-current">{ t("password.current") }</label>
                <input id="pw-current" type="password" autocomplete="current-password" required=true
                    value={fields.current.clone()}
                    oninput={input_setter(&fields, |f, v| f.current = v)} />
                <label for="pw-new">{ t("password.new") }</label>
                <input id="pw-new" type="password" autocomplete="new-password" required=true
                    value={fields.new.clone()}
                    oninput={input_setter(&fields, |f, v| f.new = v)} />
                <label for="pw-confirm">{ t("password.confirm") }</label>
                <input id="pw-confirm" type="password" autocomplete="new-password" required=true
                    value={fields.confirm.clone()}
                    oninput={input_setter(&fields, |f, v| f.confirm = v)} />
                <StatusLine flash={(*flash).clone()} />
                <div class="modal__actions">
                    if !props.forced {
                        <button type="button" class="secondary" onclick={on_cancel}>{ t("common.cancel") }</button>
                    }
                    <button type="submit" disabled={*busy} aria-busy={busy.to_string()}>{ t("password.submit") }</button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(forced: bool) -> String {
        block_on(
            LocalServerRenderer::<ChangePasswordModal>::with_props(Props {
                open: true,
                forced,
                on_close: Callback::noop(),
            })
            .render(),
        )
    }

    #[test]
    fn forced_change_cannot_be_cancelled() {
        let html = render(true);
        assert!(html.contains("Change Password Required"));
        assert!(!html.contains("modal__close"));
        assert!(!html.contains(">Cancel<"));
    }

    #[test]
    fn voluntary_change_offers_cancel() {
        let html = render(false);
        assert!(html.contains("modal__close"));
        assert!(html.contains("Cancel"));
        assert!(html.contains("pw-confirm"));
    }
}
