use magmon_core::ClientConfig;
use magmon_web::components::history_table::ordinal;
use magmon_web::components::version_select::version_label;
use magmon_web::i18n;
use magmon_web::paths;
use magmon_web::router::{Route, redirect_for};
use std::collections::BTreeMap;
use yew_router::Routable;

#[test]
fn plural_messages_pick_the_right_form() {
    let mut vars = BTreeMap::new();
    vars.insert("count", "1");
    assert_eq!(
        i18n::tr("games.submit_results_need", Some(&vars)),
        "Submit Results (need 1 more player)"
    );
    vars.insert("count", "3");
    assert_eq!(
        i18n::tr("games.submit_results_need", Some(&vars)),
        "Submit Results (need 3 more players)"
    );
    assert_eq!(i18n::tr("games.participants_count", Some(&vars)), "Participants (3)");
}

#[test]
fn error_prefixes_are_translated() {
    for key in [
        "errors.login",
        "errors.registration",
        "errors.games_load",
        "errors.deck_load",
        "errors.version_load",
        "errors.audit_load",
    ] {
        assert!(i18n::has_key(key), "{key}");
    }
    assert_eq!(i18n::t("errors.registration"), "Registration failed");
}

#[test]
fn admin_action_labels_exist() {
    assert_eq!(i18n::t("admin.actions.game_restore"), "Game restored");
    assert_eq!(i18n::t("admin.actions.game_delete"), "Game deleted");
}

#[test]
fn avatar_urls_resolve_against_the_api_origin() {
    let config = ClientConfig::default();
    let uploaded = paths::avatar_src(&config, Some("/static/avatars/3.png"));
    assert!(uploaded.ends_with("/static/avatars/3.png"), "{uploaded}");
    assert!(uploaded.starts_with("http"), "{uploaded}");
    assert!(paths::avatar_src(&config, None).ends_with(paths::DEFAULT_AVATAR));
}

#[test]
fn every_route_round_trips_through_its_path() {
    for route in [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Games,
        Route::Decks,
        Route::DeckDetail { deck_id: 4 },
        Route::DeckVersions { deck_id: 4 },
        Route::DeckVersionDetail {
            deck_id: 4,
            version_id: 9,
        },
        Route::Players,
        Route::PlayerDetail { user_id: 2 },
        Route::Profile,
        Route::AdminUsers,
        Route::AdminGames,
    ] {
        assert_eq!(Route::recognize(&route.to_path()), Some(route.clone()), "{route:?}");
        let public = matches!(route, Route::Login | Route::Register);
        assert_eq!(redirect_for(&route, None).is_some(), !public, "{route:?}");
    }
}

#[test]
fn small_formatters() {
    assert_eq!(ordinal(1), "1st");
    assert_eq!(ordinal(2), "2nd");
    assert_eq!(ordinal(3), "3rd");
    assert_eq!(ordinal(4), "4th");
    assert_eq!(ordinal(12), "12th");
    assert_eq!(ordinal(22), "22nd");
    let summary = magmon_core::model::DeckVersionSummary {
        id: 1,
        version_number: 1,
        created_at: None,
        notes: None,
        is_current: false,
    };
    assert_eq!(version_label(&summary), "V1");
}
