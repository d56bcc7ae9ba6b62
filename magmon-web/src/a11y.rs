// Accessibility helpers

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

const FOCUSABLE: &str =
    "a[href],button:not([disabled]),input:not([disabled]),select:not([disabled]),textarea:not([disabled]),[tabindex]:not([tabindex='-1'])";

/// CSS for visible focus rings and the `.sr-only` helper class.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #7c4dff;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

fn focusables(container_id: &str) -> Vec<HtmlElement> {
    let Some(container) = crate::dom::document().and_then(|doc| doc.get_element_by_id(container_id))
    else {
        return Vec::new();
    };
    let Ok(nodes) = container.query_selector_all(FOCUSABLE) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Move focus to the first focusable element inside `container_id`.
pub fn trap_focus_in(container_id: &str) {
    if !cfg!(target_arch = "wasm32") {
        return;
    }
    if let Some(first) = focusables(container_id).first() {
        let _ = first.focus();
    }
}

/// Keep Tab navigation inside `container_id`, wrapping at either end.
///
/// Returns `true` when focus was moved and the key event should be cancelled.
pub fn cycle_focus(container_id: &str, backwards: bool) -> bool {
    if !cfg!(target_arch = "wasm32") {
        return false;
    }
    let items = focusables(container_id);
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return false;
    };
    let active = crate::dom::document().and_then(|doc| doc.active_element());
    let at = |el: &HtmlElement| {
        active
            .as_ref()
            .is_some_and(|a| el.unchecked_ref::<web_sys::Element>() == a)
    };
    let target = if backwards && at(first) {
        last
    } else if !backwards && at(last) {
        first
    } else {
        return false;
    };
    let _ = target.focus();
    true
}

/// Return focus to the element that opened a dialog.
pub fn restore_focus(element_id: &str) {
    if !cfg!(target_arch = "wasm32") {
        return;
    }
    if let Some(el) = crate::dom::document()
        .and_then(|doc| doc.get_element_by_id(element_id))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}
