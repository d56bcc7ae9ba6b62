//! One view-controller per route.

pub mod admin_games;
pub mod admin_users;
pub mod dashboard;
pub mod deck_detail;
pub mod deck_version_detail;
pub mod deck_versions;
pub mod decks;
pub mod games;
pub mod login;
pub mod player_detail;
pub mod players;
pub mod profile;
pub mod register;

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

/// `oninput` handler writing an `<input>` value into a string state.
pub(crate) fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        state.set(e.target_unchecked_into::<HtmlInputElement>().value());
    })
}

pub(crate) fn bind_textarea(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        state.set(e.target_unchecked_into::<HtmlTextAreaElement>().value());
    })
}
