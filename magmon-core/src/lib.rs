//! MagMon client core
//!
//! Platform-agnostic logic for the MagMon Commander league tracker: the API
//! gateway client, the session holder, deck version resolution and the page
//! workflows. Browser specifics plug in through [`http::Transport`] and
//! [`storage::SessionStorage`].

#![forbid(unsafe_code)]

pub mod actions;
pub mod client;
pub mod colors;
pub mod config;
pub mod error;
pub mod games;
pub mod http;
pub mod model;
pub mod session;
pub mod storage;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod validation;
pub mod versions;

pub use client::ApiClient;
pub use colors::{Color, ColorSet, display_colors};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ValidationError};
pub use games::{DisplayStatus, display_status};
pub use http::{ApiRequest, ApiResponse, FilePart, Method, RequestBody, Transport};
pub use session::{ListenerId, SessionStore};
pub use storage::{MemoryStorage, SessionStorage};
pub use versions::{
    DeckSnapshot, RequestSequence, Ticket, VersionSwitch, VersionView, load_deck_snapshot,
    load_version, preferred_registration_version, resolve_initial_version, switch_version,
};
