use magmon_core::model::User;
use serde::{Deserialize, Serialize};
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/games")]
    Games,
    #[at("/decks")]
    Decks,
    #[at("/decks/:deck_id")]
    DeckDetail { deck_id: i64 },
    #[at("/decks/:deck_id/versions")]
    DeckVersions { deck_id: i64 },
    #[at("/decks/:deck_id/versions/:version_id")]
    DeckVersionDetail { deck_id: i64, version_id: i64 },
    #[at("/players")]
    Players,
    #[at("/players/:user_id")]
    PlayerDetail { user_id: i64 },
    #[at("/profile")]
    Profile,
    #[at("/admin/users")]
    AdminUsers,
    #[at("/admin/games")]
    AdminGames,
    #[at("/404")]
    #[not_found]
    NotFound,
}

/// Who may open a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Only while signed out.
    Guest,
    Member,
    Admin,
    /// Unknown paths.
    Unmatched,
}

impl Route {
    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Login | Self::Register => Access::Guest,
            Self::AdminUsers | Self::AdminGames => Access::Admin,
            Self::NotFound => Access::Unmatched,
            _ => Access::Member,
        }
    }
}

/// Where to send a visitor instead of `route`, if anywhere.
///
/// Guest pages bounce signed-in users home, everything else needs a session,
/// and admin pages are not mounted for non-admins so they fall through home.
#[must_use]
pub fn redirect_for(route: &Route, user: Option<&User>) -> Option<Route> {
    match (route.access(), user) {
        (Access::Guest, Some(_)) => Some(Route::Home),
        (Access::Guest, None) | (Access::Member, Some(_)) => None,
        (Access::Member | Access::Admin | Access::Unmatched, None) => Some(Route::Login),
        (Access::Admin, Some(user)) if user.is_admin => None,
        (Access::Admin | Access::Unmatched, Some(_)) => Some(Route::Home),
    }
}

/// Navigation state asking a deck view to open a particular deck/version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeckFocus {
    pub deck_id: Option<i64>,
    pub version_id: Option<i64>,
}

/// `?gameId=` query of the games page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameQuery {
    #[serde(rename = "gameId", default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> User {
        User {
            id: 1,
            username: "ana".into(),
            email: None,
            is_admin,
            must_change_password: false,
            avatar_url: None,
        }
    }

    #[test]
    fn signed_out_visitors_go_to_login() {
        for route in [
            Route::Home,
            Route::Games,
            Route::DeckDetail { deck_id: 4 },
            Route::AdminUsers,
            Route::NotFound,
        ] {
            assert_eq!(redirect_for(&route, None), Some(Route::Login), "{route:?}");
        }
        assert_eq!(redirect_for(&Route::Login, None), None);
        assert_eq!(redirect_for(&Route::Register, None), None);
    }

    #[test]
    fn signed_in_users_skip_guest_pages() {
        let member = user(false);
        assert_eq!(redirect_for(&Route::Login, Some(&member)), Some(Route::Home));
        assert_eq!(redirect_for(&Route::Register, Some(&member)), Some(Route::Home));
        assert_eq!(redirect_for(&Route::Profile, Some(&member)), None);
        assert_eq!(redirect_for(&Route::NotFound, Some(&member)), Some(Route::Home));
    }

    #[test]
    fn admin_pages_need_the_admin_flag() {
        assert_eq!(
            redirect_for(&Route::AdminGames, Some(&user(false))),
            Some(Route::Home)
        );
        assert_eq!(redirect_for(&Route::AdminGames, Some(&user(true))), None);
    }

    #[test]
    fn paths_map_to_routes() {
        assert_eq!(
            Route::recognize("/decks/4/versions/9"),
            Some(Route::DeckVersionDetail {
                deck_id: 4,
                version_id: 9
            })
        );
        assert_eq!(Route::DeckVersions { deck_id: 4 }.to_path(), "/decks/4/versions");
    }

    #[test]
    fn game_query_uses_camel_case_key() {
        let query = GameQuery { game_id: Some(12) };
        assert_eq!(serde_json::to_value(query).unwrap(), serde_json::json!({"gameId": 12}));
        assert_eq!(
            serde_json::to_value(GameQuery::default()).unwrap(),
            serde_json::json!({})
        );
    }
}
