use crate::components::modal::Modal;
use crate::components::status::{Flash, StatusLine};
use crate::context::use_app_context;
use crate::i18n::{t, tr};
use magmon_core::actions::decks;
use std::collections::BTreeMap;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub deck_id: i64,
    pub deck_name: AttrValue,
    /// Decklist the editor starts from.
    pub initial_decklist: AttrValue,
    pub on_close: Callback<()>,
    /// Receives the success message once the version exists.
    pub on_created: Callback<String>,
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
}

/// Dialog that saves an edited decklist as a new deck version.
#[function_component(VersionEditor)]
pub fn version_editor(props: &Props) -> Html {
    let ctx = use_app_context();
    let decklist = use_state(|| props.initial_decklist.to_string());
    let notes = use_state(String::new);
    let busy = use_state(|| false);
    let flash = use_state(|| None::<Flash>);

    {
        let decklist = decklist.clone();
        let notes = notes.clone();
        let flash = flash.clone();
        use_effect_with(
            (props.open, props.initial_decklist.clone()),
            move |(open, initial)| {
                if *open {
                    decklist.set(initial.to_string());
                    notes.set(String::new());
                    flash.set(None);
                }
                || {}
            },
        );
    }

    let on_decklist = {
        let decklist = decklist.clone();
        Callback::from(move |e: InputEvent| {
            decklist.set(e.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };
    let on_notes = {
        let notes = notes.clone();
        Callback::from(move |e: InputEvent| {
            notes.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let api = Rc::clone(&ctx.api);
        let decklist = decklist.clone();
        let notes = notes.clone();
        let busy = busy.clone();
        let flash = flash.clone();
        let on_created = props.on_created.clone();
        let deck_id = props.deck_id;
        let deck_name = props.deck_name.to_string();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            let text = (*decklist).clone();
            let note = (*notes).clone();
            let api = Rc::clone(&api);
            let busy = busy.clone();
            let flash = flash.clone();
            let on_created = on_created.clone();
            let deck_name = deck_name.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = decks::create_version(&api, deck_id, &text, &note).await;
                busy.set(false);
                match result {
                    Ok(()) => {
                        let mut args = BTreeMap::new();
                        args.insert("name", deck_name.as_str());
                        on_created.emit(tr("versions.created_for", Some(&args)));
                    }
                    Err(err) => flash.set(Some(Flash::failure("errors.version_create", &err))),
                }
            });
        })
    };
    let on_cancel = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let mut args = BTreeMap::new();
    args.insert("name", props.deck_name.as_str());
    let title = tr("versions.new_for", Some(&args));

    html! {
        <Modal
            open={props.open}
            title={title}
            on_close={props.on_close.clone()}
            return_focus_id={props.return_focus_id.clone()}
        >
            <form onsubmit={on_submit}>
                <label for="version-decklist">{ t("versions.decklist") }</label>
                <textarea id="version-decklist" rows="14" value={(*decklist).clone()} oninput={on_decklist} />
                <label for="version-notes">{ t("versions.notes") }</label>
                <input id="version-notes" type="text" placeholder={t("versions.notes_placeholder")}
                    value={(*notes).clone()} oninput={on_notes} />
                <StatusLine flash={(*flash).clone()} />
                <div class="modal__actions">
                    <button type="button" class="secondary" onclick={on_cancel} disabled={*busy}>{ t("common.cancel") }</button>
                    <button type="submit" disabled={*busy} aria-busy={busy.to_string()}>{ t("versions.save") }</button>
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

    #[test]
    fn editor_starts_from_the_given_decklist() {
        let html = block_on(
            LocalServerRenderer::<VersionEditor>::with_props(Props {
                open: true,
                deck_id: 4,
                deck_name: "Atraxa Superfriends".into(),
                initial_decklist: "1 Sol Ring\n1 Arcane Signet".into(),
                on_close: Callback::noop(),
                on_created: Callback::noop(),
                return_focus_id: None,
            })
            .render(),
        );
        assert!(html.contains("Atraxa Superfriends"));
        assert!(html.contains("1 Sol Ring"));
        assert!(html.contains("version-notes"));
    }
}
