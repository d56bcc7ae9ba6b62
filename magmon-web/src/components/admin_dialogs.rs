//! Dialogs used by the admin pages.

use crate::components::modal::Modal;
use crate::components::status::{Flash, StatusLine};
use crate::dom::copy_to_clipboard;
use crate::i18n::{fmt_datetime, t, tr};
use magmon_core::model::{AdminActionType, AuditLogEntry, TempPassword};
use std::collections::BTreeMap;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

fn emit_unit(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(()))
}

#[derive(Properties, PartialEq, Clone)]
pub struct ResetPasswordProps {
    pub open: bool,
    pub username: AttrValue,
    /// Filled in once the backend has issued the password.
    pub issued: Option<TempPassword>,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub flash: Option<Flash>,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

/// Confirm a password reset, then show the temporary password once.
#[function_component(ResetPasswordDialog)]
pub fn reset_password_dialog(props: &ResetPasswordProps) -> Html {
    let copied = use_state(|| false);
    {
        let copied = copied.clone();
        use_effect_with(props.issued.clone(), move |_| {
            copied.set(false);
            || {}
        });
    }

    let mut args = BTreeMap::new();
    args.insert("name", props.username.as_str());

    let body = if let Some(issued) = props.issued.as_ref() {
        let on_copy = {
            let password = issued.temp_password.clone();
            let copied = copied.clone();
            Callback::from(move |_| {
                copy_to_clipboard(&password);
                copied.set(true);
            })
        };
        html! {
            <>
                <p>{ tr("admin.reset_issued", Some(&args)) }</p>
                <p class="temp-password">
                    <code>{ issued.temp_password.clone() }</code>
                    <button type="button" class="secondary" onclick={on_copy}>
                        { if *copied { t("common.copied") } else { t("common.copy") } }
                    </button>
                </p>
                <p><small>{ format!("{}: {}", t("admin.expires"), fmt_datetime(&issued.expires_at)) }</small></p>
                <div class="modal__actions">
                    <button type="button" onclick={emit_unit(&props.on_close)}>{ t("common.done") }</button>
                </div>
            </>
        }
    } else {
        html! {
            <>
                <p>{ tr("admin.reset_confirm", Some(&args)) }</p>
                <StatusLine flash={props.flash.clone()} />
                <div class="modal__actions">
                    <button type="button" class="secondary" onclick={emit_unit(&props.on_close)} disabled={props.busy}>
                        { t("common.cancel") }
                    </button>
                    <button type="button" class="danger" onclick={emit_unit(&props.on_confirm)} disabled={props.busy}>
                        { t("admin.reset") }
                    </button>
                </div>
            </>
        }
    };

    html! {
        <Modal open={props.open} title={t("admin.reset_title")} on_close={props.on_close.clone()}>
            { body }
        </Modal>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct DeleteGameProps {
    pub open: bool,
    pub game_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub flash: Option<Flash>,
    /// Receives the typed reason; blank reasons are rejected by the action.
    pub on_confirm: Callback<String>,
    pub on_close: Callback<()>,
}

#[function_component(DeleteGameDialog)]
pub fn delete_game_dialog(props: &DeleteGameProps) -> Html {
    let reason = use_state(String::new);
    {
        let reason = reason.clone();
        use_effect_with(props.open, move |open| {
            if *open {
                reason.set(String::new());
            }
            || {}
        });
    }
    let on_input = {
        let reason = reason.clone();
        Callback::from(move |e: InputEvent| {
            reason.set(e.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };
    let on_confirm = {
        let reason = reason.clone();
        let cb = props.on_confirm.clone();
        Callback::from(move |_| cb.emit((*reason).clone()))
    };
    let mut args = BTreeMap::new();
    args.insert("game", props.game_label.as_str());

    html! {
        <Modal
            open={props.open}
            title={t("admin.delete_title")}
            description={Some(AttrValue::from(tr("admin.delete_confirm", Some(&args))))}
            on_close={props.on_close.clone()}
        >
            <label for="delete-reason">{ t("admin.reason") }</label>
            <textarea id="delete-reason" rows="3" required=true value={(*reason).clone()} oninput={on_input} />
            <StatusLine flash={props.flash.clone()} />
            <div class="modal__actions">
                <button type="button" class="secondary" onclick={emit_unit(&props.on_close)} disabled={props.busy}>
                    { t("common.cancel") }
                </button>
                <button type="button" class="danger" onclick={on_confirm} disabled={props.busy}>
                    { t("admin.delete") }
                </button>
            </div>
        </Modal>
    }
}

/// Readable label for an audit action.
#[must_use]
pub fn action_label(action: AdminActionType) -> String {
    match action {
        AdminActionType::GameDelete => t("admin.actions.game_delete"),
        AdminActionType::GameRestore => t("admin.actions.game_restore"),
        AdminActionType::MatchUnapprove => t("admin.actions.match_unapprove"),
        AdminActionType::MatchUnsubmit => t("admin.actions.match_unsubmit"),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct AuditLogProps {
    pub open: bool,
    pub game_id: i64,
    pub entries: Vec<AuditLogEntry>,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub flash: Option<Flash>,
    pub on_close: Callback<()>,
}

#[function_component(AuditLogDialog)]
pub fn audit_log_dialog(props: &AuditLogProps) -> Html {
    let game_id = props.game_id.to_string();
    let mut args = BTreeMap::new();
    args.insert("id", game_id.as_str());

    let body = if props.loading {
        html! { <p aria-busy="true">{ t("common.loading") }</p> }
    } else if props.entries.is_empty() {
        html! { <p class="muted">{ t("admin.audit_empty") }</p> }
    } else {
        html! {
            <table class="audit-log">
                <thead>
                    <tr>
                        <th scope="col">{ t("admin.audit_when") }</th>
                        <th scope="col">{ t("admin.audit_admin") }</th>
                        <th scope="col">{ t("admin.audit_action") }</th>
                        <th scope="col">{ t("admin.reason") }</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.entries.iter().map(|entry| html! {
                        <tr key={entry.id}>
                            <td>{ fmt_datetime(&entry.created_at) }</td>
                            <td>{ entry.admin.username.clone().unwrap_or_else(|| t("common.unknown")) }</td>
                            <td>{ action_label(entry.action_type) }</td>
                            <td>{ entry.reason.clone().unwrap_or_default() }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        }
    };

    html! {
        <Modal open={props.open} title={tr("admin.audit_title", Some(&args))} on_close={props.on_close.clone()}>
            <StatusLine flash={props.flash.clone()} />
            { body }
        </Modal>
    }
}
