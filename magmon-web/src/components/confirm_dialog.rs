use crate::components::modal::Modal;
use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
    #[prop_or_default]
    pub confirm_label: Option<AttrValue>,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
}

/// Yes/no question shown before a destructive action.
#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &Props) -> Html {
    let on_confirm = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let confirm_label = props
        .confirm_label
        .clone()
        .unwrap_or_else(|| AttrValue::from(t("common.confirm")));

    html! {
        <Modal
            open={props.open}
            title={props.title.clone()}
            description={Some(props.message.clone())}
            on_close={props.on_cancel.clone()}
            return_focus_id={props.return_focus_id.clone()}
        >
            <div class="modal__actions">
                <button type="button" class="secondary" onclick={on_cancel} disabled={props.busy}>
                    { t("common.cancel") }
                </button>
                <button type="button" class="danger" onclick={on_confirm} disabled={props.busy} aria-busy={props.busy.to_string()}>
                    { confirm_label }
                </button>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_question_and_both_choices() {
        let html = block_on(
            LocalServerRenderer::<ConfirmDialog>::with_props(Props {
                open: true,
                title: "Unregister".into(),
                message: "Are you sure you want to unregister from this game?".into(),
                on_confirm: Callback::noop(),
                on_cancel: Callback::noop(),
                confirm_label: None,
                busy: false,
                return_focus_id: None,
            })
            .render(),
        );
        assert!(html.contains("Are you sure you want to unregister from this game?"));
        assert!(html.contains("Confirm"));
        assert!(html.contains("Cancel"));
    }
}
