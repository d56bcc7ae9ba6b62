//! Form checks performed before any request is issued.

use crate::colors::ColorSet;
use crate::error::ValidationError;
use crate::model::{Placement, ProfileUpdate};
use chrono::NaiveDate;
use std::collections::HashSet;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_FAVORITE_COLOR_LEN: usize = 50;
pub const MAX_RETIREMENT_PLANE_LEN: usize = 100;
pub const AVATAR_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/gif"];

/// Trimmed text, or `None` when blank.
#[must_use]
pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// # Errors
///
/// Mismatched confirmation is reported before the length rule.
pub fn validate_password_change(new_password: &str, confirm: &str) -> Result<(), ValidationError> {
    if new_password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// # Errors
///
/// Fails when either field is blank.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::CredentialsRequired);
    }
    Ok(())
}

/// # Errors
///
/// Fails when any field is blank.
pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::RegistrationFieldsRequired);
    }
    Ok(())
}

/// # Errors
///
/// Fails on a blank name/commander or an empty color selection.
pub fn validate_new_deck(
    name: &str,
    commander: &str,
    colors: ColorSet,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() || commander.trim().is_empty() {
        return Err(ValidationError::DeckFieldsRequired);
    }
    if colors.is_empty() {
        return Err(ValidationError::NoColors);
    }
    Ok(())
}

/// # Errors
///
/// Both a deck and one of its versions must be chosen.
pub fn validate_registration_selection(
    deck_id: Option<i64>,
    version_id: Option<i64>,
) -> Result<(i64, i64), ValidationError> {
    match (deck_id, version_id) {
        (Some(deck), Some(version)) => Ok((deck, version)),
        _ => Err(ValidationError::DeckAndVersionRequired),
    }
}

/// Check a results form: every registered player needs a distinct place in
/// `1..=players.len()`.
///
/// # Errors
///
/// Reports the first rule broken, in the order: player count, missing
/// placement, range, uniqueness.
pub fn validate_placements(
    entries: &[(i64, Option<u32>)],
) -> Result<Vec<Placement>, ValidationError> {
    if entries.len() < 2 {
        return Err(ValidationError::NotEnoughPlayers);
    }
    let mut placements = Vec::with_capacity(entries.len());
    for (user_id, placement) in entries {
        let placement = placement.ok_or(ValidationError::MissingPlacement)?;
        placements.push(Placement {
            user_id: *user_id,
            placement,
        });
    }
    let max = u32::try_from(entries.len()).unwrap_or(u32::MAX);
    if placements.iter().any(|p| p.placement == 0 || p.placement > max) {
        return Err(ValidationError::PlacementOutOfRange);
    }
    let mut seen = HashSet::with_capacity(placements.len());
    if !placements.iter().all(|p| seen.insert(p.placement)) {
        return Err(ValidationError::DuplicatePlacement);
    }
    Ok(placements)
}

/// # Errors
///
/// Rejections must explain themselves.
pub fn validate_rejection_notes(notes: &str) -> Result<String, ValidationError> {
    optional_text(notes).ok_or(ValidationError::RejectionNotesRequired)
}

/// # Errors
///
/// Admin deletions and restorations require a reason.
pub fn validate_reason(reason: &str) -> Result<String, ValidationError> {
    optional_text(reason).ok_or(ValidationError::ReasonRequired)
}

/// Check an avatar selection by MIME type, or by extension when the browser
/// reports none.
///
/// # Errors
///
/// Fails without a file or for anything but PNG, JPEG and GIF.
pub fn validate_avatar(file: Option<(&str, &str)>) -> Result<(), ValidationError> {
    let (file_name, content_type) = file.ok_or(ValidationError::NoFileSelected)?;
    let accepted = if content_type.is_empty() {
        let lower = file_name.to_ascii_lowercase();
        [".png", ".jpg", ".jpeg", ".gif"]
            .iter()
            .any(|ext| lower.ends_with(ext))
    } else {
        AVATAR_CONTENT_TYPES.contains(&content_type)
    };
    if accepted {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedImageType)
    }
}

/// Build a profile update; blank fields clear the stored value.
///
/// # Errors
///
/// Fails when a field exceeds the backend's length limits.
pub fn validate_profile_update(
    favorite_color: &str,
    retirement_plane: &str,
) -> Result<ProfileUpdate, ValidationError> {
    let favorite_color = optional_text(favorite_color);
    let retirement_plane = optional_text(retirement_plane);
    if favorite_color
        .as_ref()
        .is_some_and(|c| c.chars().count() > MAX_FAVORITE_COLOR_LEN)
    {
        return Err(ValidationError::FavoriteColorTooLong);
    }
    if retirement_plane
        .as_ref()
        .is_some_and(|p| p.chars().count() > MAX_RETIREMENT_PLANE_LEN)
    {
        return Err(ValidationError::RetirementPlaneTooLong);
    }
    Ok(ProfileUpdate {
        favorite_color,
        retirement_plane,
    })
}

/// # Errors
///
/// Fails on a blank value or anything but `YYYY-MM-DD`.
pub fn validate_game_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::GameDateRequired);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::GameDateFormat)
}
