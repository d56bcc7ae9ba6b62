use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::http::{FilePart, Transport};
use crate::model::{Deck, OwnProfile, PlayerProfile, PlayerSummary};
use crate::storage::SessionStorage;
use crate::validation::{validate_avatar, validate_profile_update};

/// Field name the backend expects for the uploaded image.
pub const AVATAR_FIELD: &str = "avatar";

/// # Errors
///
/// Length limits are checked first; otherwise the request error.
pub async fn save_profile<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    favorite_color: &str,
    retirement_plane: &str,
) -> ApiResult<OwnProfile> {
    let update = validate_profile_update(favorite_color, retirement_plane)?;
    let response = api.update_profile(&update).await?;
    Ok(response.profile)
}

/// Upload an avatar and return the refreshed profile.
///
/// # Errors
///
/// A missing or non-image file fails validation; otherwise the request error.
pub async fn upload_avatar<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    file: Option<FilePart>,
) -> ApiResult<OwnProfile> {
    validate_avatar(
        file.as_ref()
            .map(|f| (f.file_name.as_str(), f.content_type.as_str())),
    )?;
    if let Some(mut file) = file {
        file.field = AVATAR_FIELD.to_string();
        api.upload_avatar(file).await?;
    }
    api.profile().await
}

/// # Errors
///
/// Returns the request error.
pub async fn load_players<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
) -> ApiResult<Vec<PlayerSummary>> {
    api.users().await
}

/// A player's public profile and decks, fetched together.
///
/// # Errors
///
/// Fails if either request fails.
pub async fn load_player<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    user_id: i64,
) -> ApiResult<(PlayerProfile, Vec<Deck>)> {
    futures::try_join!(api.user(user_id), api.user_decks(user_id))
}
