use thiserror::Error;

/// Client-side rejection raised before any request leaves the browser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("New passwords do not match")]
    PasswordMismatch,
    #[error("New password must be at least 8 characters long")]
    PasswordTooShort,
    #[error("Please select at least one color (or Colorless).")]
    NoColors,
    #[error("Please select both a deck and a version.")]
    DeckAndVersionRequired,
    #[error("At least two players must be registered.")]
    NotEnoughPlayers,
    #[error("Please assign a placement to all registered players.")]
    MissingPlacement,
    #[error("Each player must have a unique placement.")]
    DuplicatePlacement,
    #[error("Placements must be between 1 and the number of players.")]
    PlacementOutOfRange,
    #[error("Rejection notes are required.")]
    RejectionNotesRequired,
    #[error("A reason is required.")]
    ReasonRequired,
    #[error("Please select a file first.")]
    NoFileSelected,
    #[error("Only PNG, JPEG or GIF images can be uploaded.")]
    UnsupportedImageType,
    #[error("Please choose a game date.")]
    GameDateRequired,
    #[error("Game date must use the YYYY-MM-DD format.")]
    GameDateFormat,
    #[error("Favorite color must be less than 50 characters")]
    FavoriteColorTooLong,
    #[error("Retirement plane must be less than 100 characters")]
    RetirementPlaneTooLong,
    #[error("Username and password are required.")]
    CredentialsRequired,
    #[error("Username, email and password are required.")]
    RegistrationFieldsRequired,
    #[error("Deck name and commander are required.")]
    DeckFieldsRequired,
}

/// Failure of a gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("{}", http_message(*status, message.as_deref()))]
    Http {
        status: u16,
        message: Option<String>,
    },
    #[error("{}", message.as_deref().unwrap_or("Your session has expired. Please log in again."))]
    Unauthorized { message: Option<String> },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn http_message(status: u16, message: Option<&str>) -> String {
    message.map_or_else(
        || format!("Request failed with status code {status}"),
        ToString::to_string,
    )
}

impl ApiError {
    /// Prefix the error for display, e.g. `"Registration failed: Game is full"`.
    ///
    /// Validation failures are shown bare since they already read as instructions.
    #[must_use]
    pub fn describe(&self, prefix: &str) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            other => format!("{prefix}: {other}"),
        }
    }

    /// Server-provided `error` text, when the backend sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http {
                message: Some(message),
                ..
            }
            | Self::Unauthorized {
                message: Some(message),
            } => Some(message.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_prefers_server_message() {
        let err = ApiError::Http {
            status: 409,
            message: Some("A game already exists for this date".into()),
        };
        assert_eq!(
            err.describe("Failed"),
            "Failed: A game already exists for this date"
        );
        assert_eq!(err.server_message(), Some("A game already exists for this date"));
    }

    #[test]
    fn describe_falls_back_to_status() {
        let err = ApiError::Http {
            status: 500,
            message: None,
        };
        assert_eq!(
            err.describe("Approval failed"),
            "Approval failed: Request failed with status code 500"
        );
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn validation_errors_are_not_prefixed() {
        let err = ApiError::from(ValidationError::DuplicatePlacement);
        assert_eq!(
            err.describe("Game submission failed"),
            "Each player must have a unique placement."
        );
    }

    #[test]
    fn transport_errors_carry_reason() {
        let err = ApiError::Transport("timeout of 10000ms exceeded".into());
        assert_eq!(
            err.describe("Failed to load players"),
            "Failed to load players: Network error: timeout of 10000ms exceeded"
        );
    }
}
