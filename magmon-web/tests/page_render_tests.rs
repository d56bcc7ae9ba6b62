use futures::executor::block_on;
use magmon_core::model::User;
use magmon_web::app::{AppRoot, Layout};
use magmon_web::context::AppContext;
use yew::prelude::*;
use yew::LocalServerRenderer;
use yew_router::history::{AnyHistory, MemoryHistory};
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
struct ShellProps {
    path: AttrValue,
    user: Option<User>,
}

/// Layout under a router at `path`, with `user` signed in.
#[function_component(Shell)]
fn shell(props: &ShellProps) -> Html {
    let context = use_memo(props.user.clone(), |user| {
        AppContext::from_build_env().with_user(user.clone())
    });
    let history = use_memo(props.path.clone(), |path| {
        AnyHistory::from(MemoryHistory::with_entries(vec![path.to_string()]))
    });
    html! {
        <Router history={(*history).clone()}>
            <ContextProvider<AppContext> context={(*context).clone()}>
                <Layout />
            </ContextProvider<AppContext>>
        </Router>
    }
}

fn user(is_admin: bool, must_change_password: bool) -> User {
    User {
        id: 3,
        username: "ana".into(),
        email: Some("ana@example.com".into()),
        is_admin,
        must_change_password,
        avatar_url: None,
    }
}

fn render_at(path: &str, user: Option<User>) -> String {
    block_on(
        LocalServerRenderer::<Shell>::with_props(ShellProps {
            path: AttrValue::from(path.to_string()),
            user,
        })
        .render(),
    )
}

#[derive(Properties, PartialEq, Clone)]
struct RootProps {
    path: AttrValue,
}

#[function_component(RootHarness)]
fn root_harness(props: &RootProps) -> Html {
    let history = use_memo(props.path.clone(), |path| {
        AnyHistory::from(MemoryHistory::with_entries(vec![path.to_string()]))
    });
    html! {
        <Router history={(*history).clone()}>
            <AppRoot />
        </Router>
    }
}

#[test]
fn signed_out_root_shows_login_form_without_nav() {
    let html = block_on(
        LocalServerRenderer::<RootHarness>::with_props(RootProps {
            path: AttrValue::from("/login"),
        })
        .render(),
    );
    assert!(html.contains("Skip to content"));
    assert!(html.contains("id=\"main\""));
    assert!(html.contains("Access your account"), "{html}");
    assert!(html.contains("href=\"/register\""));
    assert!(!html.contains("Logout"));
}

#[test]
fn register_page_links_back_to_login() {
    let html = render_at("/register", None);
    assert!(html.contains("Create a new account"), "{html}");
    assert!(html.contains("href=\"/login\""));
}

#[test]
fn member_sees_nav_and_dashboard() {
    let html = render_at("/", Some(user(false, false)));
    assert!(html.contains("Welcome, ana"), "{html}");
    assert!(html.contains("Results Awaiting Approval"));
    assert!(html.contains("href=\"/games\""));
    assert!(html.contains("Logout"));
    assert!(!html.contains("href=\"/admin/users\""));
}

#[test]
fn admin_nav_includes_admin_links() {
    let html = render_at("/", Some(user(true, false)));
    assert!(html.contains("href=\"/admin/users\""), "{html}");
    assert!(html.contains("href=\"/admin/games\""));
}

#[test]
fn members_are_kept_out_of_admin_pages() {
    let html = render_at("/admin/users", Some(user(false, false)));
    assert!(!html.contains("Loading users..."), "{html}");
    let html = render_at("/admin/users", Some(user(true, false)));
    assert!(html.contains("Loading users..."), "{html}");
    let html = render_at("/admin/games", Some(user(true, false)));
    assert!(html.contains("Loading games..."), "{html}");
}

#[test]
fn forced_password_change_opens_the_dialog() {
    let html = render_at("/", Some(user(false, true)));
    assert!(html.contains("Change Password Required"), "{html}");
    assert!(html.contains("id=\"pw-current\""));
    let html = render_at("/", Some(user(false, false)));
    assert!(!html.contains("Change Password Required"));
}

#[test]
fn member_pages_render_their_loading_shells() {
    let games = render_at("/games", Some(user(false, false)));
    assert!(games.contains("Create New Game"), "{games}");
    assert!(games.contains("Game List"));

    let decks = render_at("/decks", Some(user(false, false)));
    assert!(decks.contains("Create New Deck"), "{decks}");
    assert!(decks.contains("Loading decks..."));

    let players = render_at("/players", Some(user(false, false)));
    assert!(players.contains("Loading players..."), "{players}");

    let player = render_at("/players/7", Some(user(false, false)));
    assert!(player.contains("Loading player data..."), "{player}");

    let profile = render_at("/profile", Some(user(false, false)));
    assert!(profile.contains("Loading profile..."), "{profile}");

    let deck = render_at("/decks/4", Some(user(false, false)));
    assert!(deck.contains("Loading deck details..."), "{deck}");

    let versions = render_at("/decks/4/versions", Some(user(false, false)));
    assert!(versions.contains("Loading deck versions..."), "{versions}");

    let version = render_at("/decks/4/versions/31", Some(user(false, false)));
    assert!(version.contains("Loading version details..."), "{version}");
}
