//! API gateway client.
//!
//! Every call attaches the stored bearer token, logs the exchange, and maps
//! non-2xx responses onto [`ApiError`]. A 401 from any endpoint ends the
//! session: both persisted values are cleared and the unauthorized handler
//! (the web app routes to `/login`) fires before the error is returned.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{ApiRequest, ApiResponse, FilePart, Method, RequestBody, Transport};
use crate::model::{
    AdminCheck, AdminReason, AdminToggle, AdminUser, AuditLogEntry, AvatarUploadResponse,
    ChangePasswordRequest, ChangePasswordResponse, Deck, DeckDetail, DeckHistoryItem,
    DeckVersionDetail, DeckVersionSummary, DeletedGame, Game, GameStatus, GameStatusUpdate,
    LoginRequest, LoginResponse, MatchDetails, MatchReview, MatchStatus, MatchSubmission,
    MatchSubmitted, MatchSummary, MessageResponse, NewDeck, NewDeckVersion, NewGame,
    NewRegistration, OwnProfile, PlayerProfile, PlayerSummary, ProfileUpdate,
    ProfileUpdateResponse, RegisterRequest, Registration, TempPassword,
};
use crate::session::SessionStore;
use crate::storage::SessionStorage;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

type UnauthorizedHandler = Rc<dyn Fn()>;

pub struct ApiClient<T: Transport, S: SessionStorage> {
    config: ClientConfig,
    transport: T,
    session: Rc<SessionStore<S>>,
    on_unauthorized: RefCell<Option<UnauthorizedHandler>>,
}

impl<T: Transport, S: SessionStorage> ApiClient<T, S> {
    pub fn new(config: ClientConfig, transport: T, session: Rc<SessionStore<S>>) -> Self {
        Self {
            config,
            transport,
            session,
            on_unauthorized: RefCell::new(None),
        }
    }

    /// Install the side effect run after a 401 has cleared the session.
    pub fn set_unauthorized_handler(&self, handler: impl Fn() + 'static) {
        *self.on_unauthorized.borrow_mut() = Some(Rc::new(handler));
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn session(&self) -> &Rc<SessionStore<S>> {
        &self.session
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue a request and decode its JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the transport fails, the server answers with a
    /// non-2xx status, or the body does not decode into `R`.
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> ApiResult<R> {
        let response = self.send(method, path, body).await?;
        let text = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(text).map_err(|err| {
            log::error!("{method} {path}: undecodable response: {err}");
            ApiError::from(err)
        })
    }

    async fn send(&self, method: Method, path: &str, body: RequestBody) -> ApiResult<ApiResponse> {
        let request = ApiRequest {
            method,
            url: self.config.endpoint_url(path),
            bearer: self.session.token(),
            body,
        };
        log::debug!("API request: {method} {}", request.url);

        let response = self.transport.send(request).await.map_err(|reason| {
            log::warn!("{method} {path}: transport failure: {reason}");
            ApiError::Transport(reason)
        })?;
        log::debug!("API response: {method} {path} -> {}", response.status);

        if response.is_success() {
            return Ok(response);
        }
        let message = response.error_message();
        if response.status == 401 {
            log::warn!("{method} {path}: unauthorized, ending session");
            self.session.logout();
            let handler = self.on_unauthorized.borrow().clone();
            if let Some(handler) = handler {
                handler();
            }
            return Err(ApiError::Unauthorized { message });
        }
        log::warn!(
            "{method} {path}: HTTP {} {}",
            response.status,
            message.as_deref().unwrap_or("")
        );
        Err(ApiError::Http {
            status: response.status,
            message,
        })
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        self.request(Method::Get, path, RequestBody::Empty).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`]; also fails if `body` cannot be serialized.
    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        self.request(Method::Post, path, json_body(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::post`].
    pub async fn patch<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        self.request(Method::Patch, path, json_body(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        self.request(Method::Delete, path, RequestBody::Empty).await
    }

    // --- session ---

    /// # Errors
    ///
    /// Fails on rejected credentials or transport errors.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.post("login", request).await
    }

    /// # Errors
    ///
    /// Fails when the backend rejects the registration.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<MessageResponse> {
        self.post("register", request).await
    }

    /// # Errors
    ///
    /// Fails when the current password is wrong or the request fails.
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ApiResult<ChangePasswordResponse> {
        self.post("change-password", request).await
    }

    // --- profile ---

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn profile(&self) -> ApiResult<OwnProfile> {
        self.get("profile").await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<ProfileUpdateResponse> {
        self.patch("profile", update).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn upload_avatar(&self, file: FilePart) -> ApiResult<AvatarUploadResponse> {
        self.request(Method::Post, "profile/avatar", RequestBody::Multipart(file))
            .await
    }

    // --- users ---

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn users(&self) -> ApiResult<Vec<PlayerSummary>> {
        self.get("users").await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn user(&self, user_id: i64) -> ApiResult<PlayerProfile> {
        self.get(&format!("users/{user_id}")).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn user_decks(&self, user_id: i64) -> ApiResult<Vec<Deck>> {
        self.get(&format!("users/{user_id}/decks")).await
    }

    // --- decks ---

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn create_deck(&self, deck: &NewDeck) -> ApiResult<Value> {
        self.post("decks", deck).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn decks(&self) -> ApiResult<Vec<Deck>> {
        self.get("decks").await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn deck(&self, deck_id: i64) -> ApiResult<DeckDetail> {
        self.get(&format!("decks/{deck_id}")).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn deck_history(&self, deck_id: i64) -> ApiResult<Vec<DeckHistoryItem>> {
        self.get(&format!("decks/{deck_id}/history")).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn deck_versions(&self, deck_id: i64) -> ApiResult<Vec<DeckVersionSummary>> {
        self.get(&format!("decks/{deck_id}/versions")).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn create_deck_version(
        &self,
        deck_id: i64,
        version: &NewDeckVersion,
    ) -> ApiResult<Value> {
        self.post(&format!("decks/{deck_id}/versions"), version)
            .await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn deck_version(
        &self,
        deck_id: i64,
        version_id: i64,
    ) -> ApiResult<DeckVersionDetail> {
        self.get(&format!("decks/{deck_id}/versions/{version_id}"))
            .await
    }

    // --- games ---

    /// # Errors
    ///
    /// Fails on transport or HTTP errors (409 when the date is taken).
    pub async fn create_game(&self, game: &NewGame) -> ApiResult<Value> {
        self.post("games", game).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn games(&self, status: Option<GameStatus>) -> ApiResult<Vec<Game>> {
        match status {
            Some(status) => self.get(&format!("games?status={status}")).await,
            None => self.get("games").await,
        }
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn update_game_status(&self, game_id: i64, status: GameStatus) -> ApiResult<Value> {
        self.patch(&format!("games/{game_id}"), &GameStatusUpdate { status })
            .await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn register_for_game(
        &self,
        game_id: i64,
        registration: &NewRegistration,
    ) -> ApiResult<MessageResponse> {
        self.post(&format!("games/{game_id}/registrations"), registration)
            .await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn registrations(&self, game_id: i64) -> ApiResult<Vec<Registration>> {
        self.get(&format!("games/{game_id}/registrations")).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn unregister_from_game(&self, game_id: i64) -> ApiResult<MessageResponse> {
        self.delete(&format!("games/{game_id}/registrations")).await
    }

    // --- matches ---

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn submit_match(&self, submission: &MatchSubmission) -> ApiResult<MatchSubmitted> {
        self.post("matches", submission).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn matches(&self, status: Option<MatchStatus>) -> ApiResult<Vec<MatchSummary>> {
        match status {
            Some(status) => {
                self.get(&format!("matches?status={}", status.as_str()))
                    .await
            }
            None => self.get("matches").await,
        }
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn match_details(&self, match_id: i64) -> ApiResult<MatchDetails> {
        self.get(&format!("matches/{match_id}")).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn approve_match(&self, match_id: i64, review: &MatchReview) -> ApiResult<Value> {
        self.patch(&format!("matches/{match_id}/approve"), review)
            .await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn reject_match(&self, match_id: i64, review: &MatchReview) -> ApiResult<Value> {
        self.patch(&format!("matches/{match_id}/reject"), review)
            .await
    }

    // --- admin ---

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn admin_check(&self) -> ApiResult<AdminCheck> {
        self.get("admin/check").await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn admin_users(&self) -> ApiResult<Vec<AdminUser>> {
        self.get("admin/users").await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors (403 for other admins).
    pub async fn reset_password(&self, user_id: i64) -> ApiResult<TempPassword> {
        self.request(
            Method::Post,
            &format!("admin/users/{user_id}/reset-password"),
            RequestBody::Empty,
        )
        .await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors (403 for the caller's own account).
    pub async fn toggle_admin(&self, user_id: i64) -> ApiResult<AdminToggle> {
        self.request(
            Method::Post,
            &format!("admin/users/{user_id}/make-admin"),
            RequestBody::Empty,
        )
        .await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn deleted_games(&self) -> ApiResult<Vec<DeletedGame>> {
        self.get("admin/games/deleted").await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn audit_log(&self, game_id: i64) -> ApiResult<Vec<AuditLogEntry>> {
        self.get(&format!("admin/games/{game_id}/audit-log")).await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn delete_game(
        &self,
        game_id: i64,
        reason: &AdminReason,
    ) -> ApiResult<MessageResponse> {
        self.request(
            Method::Delete,
            &format!("admin/games/{game_id}"),
            json_body(reason)?,
        )
        .await
    }

    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    pub async fn restore_game(
        &self,
        game_id: i64,
        reason: &AdminReason,
    ) -> ApiResult<MessageResponse> {
        self.post(&format!("admin/games/{game_id}/restore"), reason)
            .await
    }
}

fn json_body<B: Serialize>(body: &B) -> ApiResult<RequestBody> {
    Ok(RequestBody::Json(serde_json::to_value(body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, TOKEN_KEY, USER_KEY};
    use crate::testing::MockTransport;
    use futures::executor::block_on;
    use std::cell::Cell;

    fn client(transport: MockTransport) -> ApiClient<MockTransport, MemoryStorage> {
        let storage = MemoryStorage::with_entries([
            (USER_KEY, r#"{"id":1,"username":"ana"}"#),
            (TOKEN_KEY, "secret"),
        ]);
        let session = Rc::new(SessionStore::restore(storage));
        ApiClient::new(ClientConfig::default(), transport, session)
    }

    #[test]
    fn attaches_bearer_token_and_base_url() {
        let transport = MockTransport::new().respond(Method::Get, "users", 200, "[]");
        let api = client(transport);
        let players = block_on(api.users()).unwrap();
        assert!(players.is_empty());
        let sent = api.transport().requests();
        assert_eq!(sent[0].url, "http://127.0.0.1:5004/api/users");
        assert_eq!(sent[0].bearer.as_deref(), Some("secret"));
    }

    #[test]
    fn unauthorized_clears_session_and_fires_handler() {
        let transport = MockTransport::new().respond(
            Method::Get,
            "profile",
            401,
            r#"{"msg":"Token has expired"}"#,
        );
        let api = client(transport);
        let redirected = Rc::new(Cell::new(false));
        let flag = Rc::clone(&redirected);
        api.set_unauthorized_handler(move || flag.set(true));

        let err = block_on(api.profile()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert!(redirected.get());
        assert!(!api.session().storage().contains(TOKEN_KEY));
        assert!(!api.session().storage().contains(USER_KEY));
        assert!(!api.session().is_logged_in());
    }

    #[test]
    fn http_errors_carry_server_message() {
        let transport = MockTransport::new().respond(
            Method::Post,
            "games",
            409,
            r#"{"error":"A game for 2025-03-14 already exists."}"#,
        );
        let api = client(transport);
        let game = NewGame {
            game_date: "2025-03-14".into(),
            is_pauper: false,
            details: String::new(),
        };
        let err = block_on(api.create_game(&game)).unwrap_err();
        assert_eq!(
            err.describe("Failed"),
            "Failed: A game for 2025-03-14 already exists."
        );
    }

    #[test]
    fn transport_failure_is_reported() {
        let api = client(MockTransport::new());
        let err = block_on(api.decks()).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn status_filters_are_encoded_in_query() {
        let transport = MockTransport::new()
            .respond(Method::Get, "games?status=Upcoming", 200, "[]")
            .respond(Method::Get, "matches?status=pending", 200, "[]");
        let api = client(transport);
        block_on(api.games(Some(GameStatus::Upcoming))).unwrap();
        block_on(api.matches(Some(MatchStatus::Pending))).unwrap();
        assert_eq!(api.transport().requests().len(), 2);
    }

    #[test]
    fn admin_delete_sends_reason_body() {
        let transport = MockTransport::new().respond(
            Method::Delete,
            "admin/games/4",
            200,
            r#"{"message":"ok"}"#,
        );
        let api = client(transport);
        block_on(api.delete_game(
            4,
            &AdminReason {
                reason: "duplicate entry".into(),
            },
        ))
        .unwrap();
        let sent = api.transport().requests();
        assert_eq!(
            sent[0].body,
            RequestBody::Json(serde_json::json!({"reason": "duplicate entry"}))
        );
    }
}
