use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

/// The global `window`, absent outside a browser (SSR, host tests).
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    if cfg!(target_arch = "wasm32") {
        web_sys::console::error_1(&JsValue::from(message));
    }
}

/// Copy text to the clipboard; failures are logged.
pub fn copy_to_clipboard(text: &str) {
    if !cfg!(target_arch = "wasm32") {
        return;
    }
    let Some(clipboard) = window().map(|win| win.navigator().clipboard()) else {
        return;
    };
    let promise = clipboard.write_text(text);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
            log::warn!("clipboard write failed: {}", js_error_message(&err));
        }
    });
}
