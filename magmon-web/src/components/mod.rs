pub mod admin_dialogs;
pub mod avatar;
pub mod change_password_modal;
pub mod color_picker;
pub mod confirm_dialog;
pub mod deck_view;
pub mod history_table;
pub mod modal;
pub mod nav;
pub mod status;
pub mod version_editor;
pub mod version_panel;
pub mod version_select;
