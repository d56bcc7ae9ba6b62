use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::http::Transport;
use crate::model::{ChangePasswordRequest, LoginRequest, RegisterRequest, User};
use crate::storage::SessionStorage;
use crate::validation::{validate_credentials, validate_password_change, validate_signup};

pub const REGISTERED_MESSAGE: &str = "Registration successful! Please login.";
pub const PASSWORD_CHANGED_MESSAGE: &str = "Password changed successfully";

/// Sign in and start a session.
///
/// # Errors
///
/// Blank fields fail validation; otherwise the backend's rejection.
pub async fn login<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    username: &str,
    password: &str,
) -> ApiResult<User> {
    validate_credentials(username, password)?;
    let response = api
        .login(&LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        })
        .await?;
    api.session()
        .login(response.user.clone(), &response.access_token);
    Ok(response.user)
}

/// Create an account; returns the message to show.
///
/// # Errors
///
/// Blank fields fail validation; otherwise the backend's rejection.
pub async fn register<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    username: &str,
    email: &str,
    password: &str,
) -> ApiResult<String> {
    validate_signup(username, email, password)?;
    let response = api
        .register(&RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        })
        .await?;
    Ok(response
        .message
        .unwrap_or_else(|| REGISTERED_MESSAGE.to_string()))
}

/// Change the password and swap in the token the backend issues for it.
///
/// # Errors
///
/// Confirmation and length are checked before any request.
pub async fn change_password<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    current_password: &str,
    new_password: &str,
    confirm_password: &str,
) -> ApiResult<String> {
    validate_password_change(new_password, confirm_password)?;
    let response = api
        .change_password(&ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        })
        .await?;
    api.session()
        .complete_password_change(&response.access_token);
    Ok(response
        .message
        .unwrap_or_else(|| PASSWORD_CHANGED_MESSAGE.to_string()))
}

pub fn logout<T: Transport, S: SessionStorage>(api: &ApiClient<T, S>) {
    api.session().logout();
}
