//! Application context shared through the component tree.

use crate::net::BrowserTransport;
use crate::storage::BrowserStorage;
use magmon_core::model::User;
use magmon_core::{ApiClient, ClientConfig, SessionStore};
use std::rc::Rc;
use yew::prelude::*;

pub type WebClient = ApiClient<BrowserTransport, BrowserStorage>;

/// Gateway client plus the session user it currently reports.
///
/// `user` mirrors the [`SessionStore`] and is refreshed by the app root's
/// subscription, so pages re-render on login, logout and forced logout.
#[derive(Clone)]
pub struct AppContext {
    pub api: Rc<WebClient>,
    pub user: Option<User>,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api) && self.user == other.user
    }
}

impl AppContext {
    /// Client configured from the build environment, session restored from storage.
    #[must_use]
    pub fn from_build_env() -> Self {
        #[cfg(test)]
        tests::BUILDS.with(|n| n.set(n.get() + 1));
        let config = ClientConfig::from_build_env();
        let transport = BrowserTransport::new(config.timeout_ms);
        let session = Rc::new(SessionStore::restore(BrowserStorage::new()));
        let api = Rc::new(ApiClient::new(config, transport, session));
        let user = api.session().current_user();
        Self { api, user }
    }

    #[must_use]
    pub fn with_user(&self, user: Option<User>) -> Self {
        Self {
            api: Rc::clone(&self.api),
            user,
        }
    }

    /// Id of the signed-in user, `0` when signed out.
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user.as_ref().map_or(0, |u| u.id)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }
}

/// The surrounding [`AppContext`], or a detached one when rendered standalone.
///
/// The detached context is built on first use only, in a slot that exists
/// either way so hook order does not depend on the provider.
#[hook]
pub fn use_app_context() -> AppContext {
    let provided = use_context::<AppContext>();
    let detached = use_mut_ref(|| None::<AppContext>);
    provided.unwrap_or_else(|| {
        detached
            .borrow_mut()
            .get_or_insert_with(AppContext::from_build_env)
            .clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;
    use yew::LocalServerRenderer;

    thread_local! {
        pub(super) static BUILDS: Cell<usize> = const { Cell::new(0) };
    }

    #[function_component(UserName)]
    fn user_name() -> Html {
        let ctx = use_app_context();
        html! { <span>{ ctx.user.map(|u| u.username).unwrap_or_default() }</span> }
    }

    #[function_component(Provided)]
    fn provided() -> Html {
        let ctx = use_memo((), |()| AppContext::from_build_env().with_user(Some(user(false))));
        html! {
            <ContextProvider<AppContext> context={(*ctx).clone()}>
                <UserName />
                <UserName />
                <UserName />
            </ContextProvider<AppContext>>
        }
    }

    #[test]
    fn consumers_under_a_provider_build_no_client_of_their_own() {
        BUILDS.with(|n| n.set(0));
        let html = block_on(LocalServerRenderer::<Provided>::new().render());
        assert_eq!(html.matches("<span>ana</span>").count(), 3, "{html}");
        assert_eq!(BUILDS.with(Cell::get), 1);
    }

    #[test]
    fn standalone_consumer_builds_one_detached_context() {
        BUILDS.with(|n| n.set(0));
        let html = block_on(LocalServerRenderer::<UserName>::new().render());
        assert!(html.contains("<span></span>"), "{html}");
        assert_eq!(BUILDS.with(Cell::get), 1);
    }

    fn user(is_admin: bool) -> User {
        User {
            id: 3,
            username: "ana".into(),
            email: None,
            is_admin,
            must_change_password: false,
            avatar_url: None,
        }
    }

    #[test]
    fn equality_tracks_client_identity_and_user() {
        let ctx = AppContext::from_build_env();
        assert!(ctx.user.is_none());
        assert_eq!(ctx.user_id(), 0);
        let signed_in = ctx.with_user(Some(user(true)));
        assert!(signed_in.is_admin());
        assert_eq!(signed_in.user_id(), 3);
        assert!(ctx != signed_in);
        assert!(signed_in == signed_in.with_user(Some(user(true))));
        assert!(signed_in != AppContext::from_build_env().with_user(Some(user(true))));
    }
}
