use magmon_core::ApiError;
use yew::prelude::*;

/// Outcome line shown under a form or list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
    Info(String),
}

impl Flash {
    /// Error line with the operation's prefix.
    #[must_use]
    pub fn failure(prefix_key: &str, err: &ApiError) -> Self {
        Self::Error(err.describe(&crate::i18n::t(prefix_key)))
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) | Self::Info(text) => text,
        }
    }

    const fn class(&self) -> &'static str {
        match self {
            Self::Success(_) => "status status--success",
            Self::Error(_) => "status status--error",
            Self::Info(_) => "status status--info",
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct StatusLineProps {
    pub flash: Option<Flash>,
}

#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    let Some(flash) = props.flash.as_ref() else {
        return Html::default();
    };
    let role = if matches!(flash, Flash::Error(_)) {
        "alert"
    } else {
        "status"
    };
    html! {
        <p class={flash.class()} role={role}><small>{ flash.text().to_string() }</small></p>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use magmon_core::ValidationError;
    use yew::LocalServerRenderer;

    #[test]
    fn failures_use_prefix_except_for_validation() {
        let err = ApiError::Http {
            status: 400,
            message: Some("Game is full".into()),
        };
        assert_eq!(
            Flash::failure("errors.registration", &err),
            Flash::Error("Registration failed: Game is full".into())
        );
        let err = ApiError::from(ValidationError::NoColors);
        assert_eq!(
            Flash::failure("errors.deck_create", &err).text(),
            "Please select at least one color (or Colorless)."
        );
    }

    #[test]
    fn errors_render_as_alerts() {
        let html = block_on(
            LocalServerRenderer::<StatusLine>::with_props(StatusLineProps {
                flash: Some(Flash::Error("Login failed: nope".into())),
            })
            .render(),
        );
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("Login failed: nope"));
    }
}
