//! Pico-styled `<dialog>` shell shared by every popup in the app.

use crate::a11y::{cycle_focus, restore_focus, trap_focus_in};
use crate::i18n::t;
use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static NEXT_DIALOG: AtomicUsize = AtomicUsize::new(0);

/// Element ids derived from one dialog instance.
struct DialogIds {
    root: String,
    title: String,
    description: String,
}

impl DialogIds {
    fn new(n: usize) -> Self {
        Self {
            root: format!("dialog-{n}"),
            title: format!("dialog-{n}-title"),
            description: format!("dialog-{n}-desc"),
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    /// Forced dialogs hide the close button and ignore Escape and backdrop clicks.
    #[prop_or(true)]
    pub dismissible: bool,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    /// Element focused again once the dialog closes.
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let n = *use_memo((), |()| NEXT_DIALOG.fetch_add(1, Ordering::Relaxed));
    let ids = DialogIds::new(n);
    let article_ref = use_node_ref();
    let was_open = use_mut_ref(|| props.open);

    {
        let article_ref = article_ref.clone();
        let root_id = ids.root.clone();
        use_effect_with(
            (props.open, props.return_focus_id.clone()),
            move |(open, return_focus)| {
                let closing = *was_open.borrow() && !*open;
                *was_open.borrow_mut() = *open;
                if *open {
                    if let Some(article) = article_ref.cast::<web_sys::HtmlElement>() {
                        let _ = article.set_attribute("tabindex", "-1");
                        let _ = article.focus();
                    }
                    trap_focus_in(&root_id);
                } else if closing && let Some(id) = return_focus.as_deref() {
                    restore_focus(id);
                }
                || {}
            },
        );
    }

    if !props.open {
        return Html::default();
    }

    let dismiss = {
        let on_close = props.on_close.clone();
        let dismissible = props.dismissible;
        Callback::from(move |()| {
            if dismissible {
                on_close.emit(());
            }
        })
    };
    let on_backdrop = dismiss.reform(|_: MouseEvent| ());
    let on_close_click = dismiss.reform(|_: MouseEvent| ());
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_keydown = {
        let dismissible = props.dismissible;
        let return_focus = props.return_focus_id.clone();
        let root_id = ids.root.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Tab" {
                if cycle_focus(&root_id, e.shift_key()) {
                    e.prevent_default();
                }
            } else if e.key() == "Escape" && dismissible {
                e.prevent_default();
                dismiss.emit(());
                if let Some(id) = return_focus.as_deref() {
                    restore_focus(id);
                }
            }
        })
    };

    let described_by = props
        .description
        .as_ref()
        .map(|_| ids.description.clone())
        .unwrap_or_default();

    html! {
        <dialog open=true class="modal-backdrop" onclick={on_backdrop}>
            <article
                id={ids.root.clone()}
                class="modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby={ids.title.clone()}
                aria-describedby={described_by}
                onclick={keep_open}
                onkeydown={on_keydown}
                ref={article_ref}
            >
                <header class="modal__header">
                    if props.dismissible {
                        <button
                            type="button"
                            class="modal__close close"
                            aria-label={t("common.close_dialog")}
                            onclick={on_close_click}
                        />
                    }
                    <h3 id={ids.title.clone()}>{ props.title.clone() }</h3>
                </header>
                if let Some(text) = props.description.clone() {
                    <p id={ids.description.clone()} class="modal__description">{ text }</p>
                }
                <div class="modal__body">{ for props.children.iter() }</div>
            </article>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn props(open: bool, dismissible: bool) -> Props {
        Props {
            open,
            title: "Change Password Required".into(),
            on_close: Callback::noop(),
            dismissible,
            description: Some("Pick a new one".into()),
            return_focus_id: None,
            children: Children::default(),
        }
    }

    #[test]
    fn closed_modal_renders_nothing() {
        let html = block_on(LocalServerRenderer::<Modal>::with_props(props(false, true)).render());
        assert!(!html.contains("Change Password Required"));
    }

    #[test]
    fn forced_modal_has_no_close_button() {
        let html = block_on(LocalServerRenderer::<Modal>::with_props(props(true, false)).render());
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("Pick a new one"));
        assert!(!html.contains("modal__close"));
    }

    #[test]
    fn dismissible_modal_links_title_and_description() {
        let html = block_on(LocalServerRenderer::<Modal>::with_props(props(true, true)).render());
        assert!(html.contains("modal__close"));
        assert!(html.contains("aria-labelledby=\"dialog-"));
        assert!(html.contains("-desc\""));
    }
}
