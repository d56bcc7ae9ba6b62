use futures::executor::block_on;
use magmon_core::model::{DeckDetail, DeckHistoryItem, DeckVersionSummary};
use magmon_core::{ColorSet, DeckSnapshot, VersionView};
use magmon_web::components::change_password_modal::{ChangePasswordModal, Props as PasswordProps};
use magmon_web::components::color_picker::{ColorPicker, Props as ColorPickerProps};
use magmon_web::components::confirm_dialog::{ConfirmDialog, Props as ConfirmProps};
use magmon_web::components::deck_view::DeckView;
use magmon_web::components::modal::{Modal, Props as ModalProps};
use magmon_web::components::status::{Flash, StatusLine, StatusLineProps};
use yew::html::ChildrenRenderer;
use yew::prelude::*;
use yew::{AttrValue, Callback, LocalServerRenderer};
use yew_router::history::{AnyHistory, MemoryHistory};
use yew_router::prelude::*;

fn deck() -> DeckDetail {
    DeckDetail {
        id: 4,
        name: "Atraxa Superfriends".into(),
        commander: "Atraxa, Praetors' Voice".into(),
        colors: "WUBG".into(),
        decklist_text: Some("1 Sol Ring".into()),
        user_id: 2,
        created_at: Some("2025-03-01T10:00:00".into()),
        last_updated: None,
        current_version_id: Some(31),
    }
}

fn snapshot() -> DeckSnapshot {
    let versions = vec![
        DeckVersionSummary {
            id: 31,
            version_number: 2,
            created_at: Some("2025-03-14T10:00:00".into()),
            notes: Some("Cut the Sol Ring".into()),
            is_current: true,
        },
        DeckVersionSummary {
            id: 30,
            version_number: 1,
            created_at: Some("2025-03-01T10:00:00".into()),
            notes: None,
            is_current: false,
        },
    ];
    DeckSnapshot {
        deck: deck(),
        versions,
        history: vec![
            DeckHistoryItem {
                game_id: 14,
                game_date: "2025-03-22".into(),
                placement: None,
                version_number: Some(2),
            },
            DeckHistoryItem {
                game_id: 12,
                game_date: "2025-03-15".into(),
                placement: Some(1),
                version_number: Some(2),
            },
        ],
        selected_version_id: Some(31),
        version: VersionView {
            version_id: Some(31),
            version_number: 2,
            created_at: Some("2025-03-14T10:00:00".into()),
            notes: Some("Cut the Sol Ring".into()),
            decklist_text: Some("1 Command Tower".into()),
            is_current: true,
            is_placeholder: false,
        },
    }
}

#[function_component(DeckViewHarness)]
fn deck_view_harness() -> Html {
    html! {
        <Router history={AnyHistory::from(MemoryHistory::new())}>
            <DeckView snapshot={snapshot()} on_select_version={Callback::noop()} />
        </Router>
    }
}

#[test]
fn deck_view_renders_version_panel_history_and_links() {
    let html = block_on(LocalServerRenderer::<DeckViewHarness>::new().render());
    assert!(html.contains("Atraxa Superfriends"));
    assert!(html.contains("Version 2"), "{html}");
    assert!(html.contains("1 Command Tower"));
    assert!(html.contains("Cut the Sol Ring"));
    assert!(html.contains("href=\"/decks/4\""));
    assert!(html.contains("href=\"/decks/4/versions\""));
    assert!(html.contains("/games?gameId=12"));
    assert!(html.contains("1st"));
    assert!(html.contains("/games?gameId=14"));
    assert!(html.contains("N/A"));
}

#[test]
fn modal_renders_only_when_open() {
    let props = |open| ModalProps {
        open,
        title: AttrValue::from("Title"),
        on_close: Callback::noop(),
        dismissible: true,
        description: Some(AttrValue::from("Desc")),
        return_focus_id: None,
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(props(true)).render());
    assert!(html.contains("role=\"dialog\""));
    assert!(html.contains("Desc"));
    let closed = block_on(LocalServerRenderer::<Modal>::with_props(props(false)).render());
    assert!(!closed.contains("role=\"dialog\""));
}

#[test]
fn confirm_dialog_uses_custom_label() {
    let html = block_on(
        LocalServerRenderer::<ConfirmDialog>::with_props(ConfirmProps {
            open: true,
            title: AttrValue::from("Cancel game"),
            message: AttrValue::from("Are you sure?"),
            on_confirm: Callback::noop(),
            on_cancel: Callback::noop(),
            confirm_label: Some(AttrValue::from("Cancel Game")),
            busy: false,
            return_focus_id: None,
        })
        .render(),
    );
    assert!(html.contains("Are you sure?"));
    assert!(html.contains("Cancel Game"));
}

#[test]
fn forced_password_change_cannot_be_dismissed() {
    let html = block_on(
        LocalServerRenderer::<ChangePasswordModal>::with_props(PasswordProps {
            open: true,
            forced: true,
            on_close: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("Change Password Required"));
    assert!(!html.contains("modal__close"));
}

#[test]
fn color_picker_marks_selected_colors() {
    let html = block_on(
        LocalServerRenderer::<ColorPicker>::with_props(ColorPickerProps {
            value: ColorSet::parse("UB"),
            on_change: Callback::noop(),
            disabled: false,
        })
        .render(),
    );
    assert!(html.contains("Blue"));
    assert!(html.contains("Black (B)"));
    assert!(html.contains("id=\"color-U\""));
}

#[test]
fn status_line_is_silent_without_a_flash() {
    let html = block_on(
        LocalServerRenderer::<StatusLine>::with_props(StatusLineProps { flash: None }).render(),
    );
    assert!(!html.contains("status"));
    let html = block_on(
        LocalServerRenderer::<StatusLine>::with_props(StatusLineProps {
            flash: Some(Flash::Success("Deck created successfully!".into())),
        })
        .render(),
    );
    assert!(html.contains("role=\"status\""));
    assert!(html.contains("Deck created successfully!"));
}
