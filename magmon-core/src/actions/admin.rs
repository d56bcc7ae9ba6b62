use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::http::Transport;
use crate::model::{AdminReason, AdminUser, AuditLogEntry, DeletedGame, Game, TempPassword};
use crate::storage::SessionStorage;
use crate::validation::validate_reason;

pub const RESTORE_REASON: &str = "Administrative restoration";

/// Server-side admin gate; any failure counts as "not an admin".
pub async fn confirm_admin<T: Transport, S: SessionStorage>(api: &ApiClient<T, S>) -> bool {
    match api.admin_check().await {
        Ok(check) => check.is_admin,
        Err(err) => {
            log::warn!("admin check failed: {err}");
            false
        }
    }
}

/// # Errors
///
/// Returns the request error.
pub async fn load_users<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
) -> ApiResult<Vec<AdminUser>> {
    api.admin_users().await
}

/// # Errors
///
/// Returns the request error.
pub async fn reset_password<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    user_id: i64,
) -> ApiResult<TempPassword> {
    let temp = api.reset_password(user_id).await?;
    log::info!("issued a temporary password for user {user_id}");
    Ok(temp)
}

/// Flip a user's admin flag and return the refreshed user list.
///
/// # Errors
///
/// Returns the request error.
pub async fn toggle_admin<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    user_id: i64,
) -> ApiResult<Vec<AdminUser>> {
    let toggled = api.toggle_admin(user_id).await?;
    log::info!("user {user_id} admin status is now {}", toggled.is_admin);
    api.admin_users().await
}

/// Active and deleted games, fetched together.
///
/// # Errors
///
/// Fails if either request fails.
pub async fn load_game_lists<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
) -> ApiResult<(Vec<Game>, Vec<DeletedGame>)> {
    futures::try_join!(api.games(None), api.deleted_games())
}

/// # Errors
///
/// A reason is required before anything is sent.
pub async fn delete_game<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    game_id: i64,
    reason: &str,
) -> ApiResult<(Vec<Game>, Vec<DeletedGame>)> {
    let reason = validate_reason(reason)?;
    api.delete_game(game_id, &AdminReason { reason }).await?;
    load_game_lists(api).await
}

/// # Errors
///
/// Returns the request error.
pub async fn restore_game<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    game_id: i64,
) -> ApiResult<(Vec<Game>, Vec<DeletedGame>)> {
    api.restore_game(
        game_id,
        &AdminReason {
            reason: RESTORE_REASON.to_string(),
        },
    )
    .await?;
    load_game_lists(api).await
}

/// # Errors
///
/// Returns the request error.
pub async fn audit_log<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    game_id: i64,
) -> ApiResult<Vec<AuditLogEntry>> {
    api.audit_log(game_id).await
}
