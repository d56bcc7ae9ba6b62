//! Page workflows: validate, call the gateway, refetch what the page shows.
//!
//! Each function returns the data the calling page should display next, or
//! an [`crate::ApiError`] for the page to render with its message prefix.

pub mod admin;
pub mod auth;
pub mod decks;
pub mod games;
pub mod profile;

pub use decks::DeckForm;
pub use games::{GameDetails, GameForm, ResultForm, ReviewOutcome};
