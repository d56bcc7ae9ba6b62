use crate::i18n::{fmt_date, t};
use magmon_core::model::DeckVersionSummary;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// `V3 (Mar 14, 2025) - Current`
#[must_use]
pub fn version_label(version: &DeckVersionSummary) -> String {
    let mut label = format!("V{}", version.version_number);
    if let Some(created) = version.created_at.as_deref() {
        label.push_str(&format!(" ({})", fmt_date(created)));
    }
    if version.is_current {
        label.push_str(&format!(" - {}", t("versions.current")));
    }
    label
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub id: AttrValue,
    pub versions: Vec<DeckVersionSummary>,
    pub selected: Option<i64>,
    pub on_select: Callback<i64>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
}

/// Version dropdown; re-selecting the current entry emits nothing.
#[function_component(VersionSelect)]
pub fn version_select(props: &Props) -> Html {
    let onchange = {
        let cb = props.on_select.clone();
        let selected = props.selected;
        Callback::from(move |e: Event| {
            let raw = e.target_unchecked_into::<HtmlSelectElement>().value();
            if let Ok(id) = raw.parse::<i64>()
                && Some(id) != selected
            {
                cb.emit(id);
            }
        })
    };
    let selected_value = props.selected.map(|id| id.to_string()).unwrap_or_default();

    html! {
        <select id={props.id.clone()} {onchange} disabled={props.disabled || props.versions.is_empty()}>
            if let Some(placeholder) = props.placeholder.clone() {
                <option value="" disabled=true selected={props.selected.is_none()}>{ placeholder }</option>
            }
            { for props.versions.iter().map(|v| {
                let value = v.id.to_string();
                html! {
                    <option value={value.clone()} selected={value == selected_value}>{ version_label(v) }</option>
                }
            }) }
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_carry_number_date_and_current_flag() {
        let version = DeckVersionSummary {
            id: 9,
            version_number: 3,
            created_at: Some("2025-03-14T18:00:00".into()),
            notes: None,
            is_current: true,
        };
        assert_eq!(version_label(&version), "V3 (Mar 14, 2025) - Current");
        let bare = DeckVersionSummary {
            created_at: None,
            is_current: false,
            ..version
        };
        assert_eq!(version_label(&bare), "V3");
    }
}
