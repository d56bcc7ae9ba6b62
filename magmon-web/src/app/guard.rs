use crate::context::use_app_context;
use crate::pages::{
    admin_games::AdminGamesPage, admin_users::AdminUsersPage, dashboard::DashboardPage,
    deck_detail::DeckDetailPage, deck_version_detail::DeckVersionDetailPage,
    deck_versions::DeckVersionsPage, decks::DecksPage, games::GamesPage, login::LoginPage,
    player_detail::PlayerDetailPage, players::PlayersPage, profile::ProfilePage,
    register::RegisterPage,
};
use crate::router::{Route, redirect_for};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub route: Route,
}

/// Render the page for `route`, or redirect when the session does not allow it.
#[function_component(RouteGuard)]
pub fn route_guard(props: &Props) -> Html {
    let ctx = use_app_context();
    if let Some(target) = redirect_for(&props.route, ctx.user.as_ref()) {
        log::debug!("redirecting {:?} to {target:?}", props.route);
        return html! { <Redirect<Route> to={target} /> };
    }
    page_for(&props.route)
}

fn page_for(route: &Route) -> Html {
    match route.clone() {
        Route::Home => html! { <DashboardPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Games => html! { <GamesPage /> },
        Route::Decks => html! { <DecksPage /> },
        Route::DeckDetail { deck_id } => html! { <DeckDetailPage {deck_id} /> },
        Route::DeckVersions { deck_id } => html! { <DeckVersionsPage {deck_id} /> },
        Route::DeckVersionDetail {
            deck_id,
            version_id,
        } => html! { <DeckVersionDetailPage {deck_id} {version_id} /> },
        Route::Players => html! { <PlayersPage /> },
        Route::PlayerDetail { user_id } => html! { <PlayerDetailPage {user_id} /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::AdminUsers => html! { <AdminUsersPage /> },
        Route::AdminGames => html! { <AdminGamesPage /> },
        // Unmatched paths always redirect.
        Route::NotFound => Html::default(),
    }
}
