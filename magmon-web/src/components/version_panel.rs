use crate::i18n::{fmt_datetime, t, tr};
use magmon_core::VersionView;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub view: VersionView,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(VersionPanel)]
pub fn version_panel(props: &Props) -> Html {
    let view = &props.view;
    let decklist = view
        .decklist_text
        .clone()
        .unwrap_or_else(|| t("versions.no_decklist"));

    let heading = if view.is_placeholder {
        html! { <p class="notice"><small>{ t("versions.none_found") }</small></p> }
    } else {
        let number = view.version_number.to_string();
        let mut args = BTreeMap::new();
        args.insert("number", number.as_str());
        html! {
            <>
                <h5>
                    { tr("versions.heading", Some(&args)) }
                    if view.is_current {
                        <span class="badge">{ t("versions.current") }</span>
                    }
                </h5>
                if let Some(created) = view.created_at.as_deref() {
                    <p><small>{ format!("{}: {}", t("versions.created"), fmt_datetime(created)) }</small></p>
                }
                if let Some(notes) = view.notes.as_deref().filter(|n| !n.trim().is_empty()) {
                    <p><strong>{ format!("{}: ", t("versions.notes")) }</strong>{ notes.to_string() }</p>
                }
            </>
        }
    };

    html! {
        <section class="version-panel" aria-busy={props.loading.to_string()}>
            { heading }
            <details open=true>
                <summary>{ t("versions.decklist") }</summary>
                <pre class="decklist">{ decklist }</pre>
            </details>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn view() -> VersionView {
        VersionView {
            version_id: Some(2),
            version_number: 2,
            created_at: None,
            notes: Some("Cut the Sol Ring".into()),
            decklist_text: Some("1 Command Tower".into()),
            is_current: true,
            is_placeholder: false,
        }
    }

    #[test]
    fn renders_version_details() {
        let html = block_on(
            LocalServerRenderer::<VersionPanel>::with_props(Props {
                view: view(),
                loading: false,
            })
            .render(),
        );
        assert!(html.contains("Version 2"));
        assert!(html.contains("Cut the Sol Ring"));
        assert!(html.contains("1 Command Tower"));
    }

    #[test]
    fn placeholder_explains_missing_versions() {
        let placeholder = VersionView {
            version_id: None,
            version_number: 0,
            created_at: None,
            notes: None,
            decklist_text: None,
            is_current: false,
            is_placeholder: true,
        };
        let html = block_on(
            LocalServerRenderer::<VersionPanel>::with_props(Props {
                view: placeholder,
                loading: false,
            })
            .render(),
        );
        assert!(html.contains("No versions found for this deck."));
        assert!(html.contains("No decklist available."));
    }
}
