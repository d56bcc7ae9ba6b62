#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod components;
pub mod context;
pub mod dom;
pub mod hooks;
pub mod i18n;
pub mod logging;
pub mod net;
pub mod pages;
pub mod paths;
pub mod router;
pub mod storage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = logging::init() {
        dom::console_error(&format!("logger setup failed: {err}"));
    }
    yew::Renderer::<app::App>::new().render();
}
