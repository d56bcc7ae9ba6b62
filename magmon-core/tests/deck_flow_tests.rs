use futures::executor::block_on;
use magmon_core::actions::decks::{self, DeckForm};
use magmon_core::storage::{TOKEN_KEY, USER_KEY};
use magmon_core::testing::MockTransport;
use magmon_core::{
    ApiClient, ApiError, ClientConfig, Color, ColorSet, MemoryStorage, Method, RequestBody,
    RequestSequence, SessionStore, VersionSwitch, load_deck_snapshot, switch_version,
};
use serde_json::json;
use std::rc::Rc;

fn signed_in(transport: MockTransport) -> ApiClient<MockTransport, MemoryStorage> {
    let storage = MemoryStorage::with_entries([
        (USER_KEY, r#"{"id":7,"username":"ana"}"#),
        (TOKEN_KEY, "tok"),
    ]);
    ApiClient::new(
        ClientConfig::default(),
        transport,
        Rc::new(SessionStore::restore(storage)),
    )
}

fn deck_json(current_version_id: Option<i64>) -> String {
    json!({
        "id": 4,
        "name": "Golgari Value",
        "commander": "Meren of Clan Nel Toth",
        "colors": "BG",
        "decklist_text": "1 Sol Ring",
        "user_id": 7,
        "created_at": "2025-01-01T10:00:00",
        "last_updated": "2025-02-01T10:00:00",
        "current_version_id": current_version_id,
    })
    .to_string()
}

fn versions_json(ids: &[(i64, u32, bool)]) -> String {
    let list: Vec<_> = ids
        .iter()
        .map(|(id, n, current)| {
            json!({"id": id, "version_number": n, "created_at": "2025-01-01T10:00:00",
                   "notes": null, "is_current": current})
        })
        .collect();
    serde_json::Value::Array(list).to_string()
}

fn version_detail(id: i64, number: u32) -> String {
    json!({"id": id, "version_number": number, "created_at": "2025-01-01T10:00:00",
           "notes": format!("v{number}"), "is_current": false,
           "decklist_text": format!("list {number}")})
    .to_string()
}

fn script(current: Option<i64>, versions: &[(i64, u32, bool)]) -> MockTransport {
    MockTransport::new()
        .respond(Method::Get, "decks/4", 200, &deck_json(current))
        .respond(Method::Get, "decks/4/versions", 200, &versions_json(versions))
        .respond(Method::Get, "decks/4/history", 200, "[]")
        .respond(Method::Get, "decks/4/versions/1", 200, &version_detail(1, 1))
        .respond(Method::Get, "decks/4/versions/2", 200, &version_detail(2, 2))
        .respond(Method::Get, "decks/4/versions/5", 200, &version_detail(5, 2))
        .respond(Method::Get, "decks/4/versions/7", 200, &version_detail(7, 1))
}

#[test]
fn target_version_is_fetched_when_listed() {
    let api = signed_in(script(Some(1), &[(1, 1, true), (2, 2, false)]));
    let snapshot = block_on(load_deck_snapshot(&api, 4, Some(2))).unwrap();
    assert_eq!(snapshot.selected_version_id, Some(2));
    assert_eq!(snapshot.version.decklist_text.as_deref(), Some("list 2"));
    assert_eq!(api.transport().count(Method::Get, "decks/4/versions/2"), 1);
    assert_eq!(api.transport().count(Method::Get, "decks/4/versions/1"), 0);
}

#[test]
fn current_version_used_without_target() {
    let api = signed_in(script(Some(1), &[(2, 2, false), (1, 1, true)]));
    let snapshot = block_on(load_deck_snapshot(&api, 4, None)).unwrap();
    assert_eq!(snapshot.selected_version_id, Some(1));
    assert_eq!(snapshot.version.version_number, 1);
}

#[test]
fn first_listed_version_used_as_last_resort() {
    let api = signed_in(script(None, &[(5, 2, false), (7, 1, false)]));
    let snapshot = block_on(load_deck_snapshot(&api, 4, None)).unwrap();
    assert_eq!(snapshot.selected_version_id, Some(5));
}

#[test]
fn deck_without_versions_gets_placeholder_and_no_version_fetch() {
    let api = signed_in(script(None, &[]));
    let snapshot = block_on(load_deck_snapshot(&api, 4, Some(3))).unwrap();
    assert!(!snapshot.has_versions());
    assert!(snapshot.version.is_placeholder);
    assert_eq!(snapshot.version.decklist_text.as_deref(), Some("1 Sol Ring"));
    assert!(
        api.transport()
            .calls()
            .iter()
            .all(|c| !c.starts_with("GET decks/4/versions/"))
    );
}

#[test]
fn any_base_fetch_failure_fails_the_whole_load() {
    let transport = MockTransport::new()
        .respond(Method::Get, "decks/4", 200, &deck_json(Some(1)))
        .respond(Method::Get, "decks/4/versions", 200, &versions_json(&[(1, 1, true)]))
        .respond(
            Method::Get,
            "decks/4/history",
            500,
            r#"{"error":"Failed to fetch deck history"}"#,
        );
    let api = signed_in(transport);
    let err = block_on(load_deck_snapshot(&api, 4, None)).unwrap_err();
    assert_eq!(
        err.describe("Failed to load deck data"),
        "Failed to load deck data: Failed to fetch deck history"
    );
    assert_eq!(api.transport().count(Method::Get, "decks/4/versions/1"), 0);
}

#[test]
fn creating_a_deck_posts_once_then_refetches() {
    let transport = MockTransport::new()
        .respond(Method::Post, "decks", 201, r#"{"message":"Deck created successfully"}"#)
        .respond(
            Method::Get,
            "users/7/decks",
            200,
            r#"[{"id":4,"name":"Golgari Value","commander":"Meren","colors":"BG"}]"#,
        );
    let api = signed_in(transport);
    let form = DeckForm {
        name: "Golgari Value".into(),
        commander: "Meren".into(),
        colors: ColorSet::empty().with(Color::Green).with(Color::Black),
        decklist_text: "1 Sol Ring".into(),
    };
    let decks = block_on(decks::create_deck(&api, 7, &form)).unwrap();
    assert_eq!(decks.len(), 1);
    assert_eq!(api.transport().calls(), ["POST decks", "GET users/7/decks"]);
    let sent = api.transport().requests();
    assert_eq!(
        sent[0].body,
        RequestBody::Json(json!({
            "name": "Golgari Value",
            "commander": "Meren",
            "colors": "BG",
            "decklist_text": "1 Sol Ring",
        }))
    );
}

#[test]
fn deck_without_colors_is_never_posted() {
    let api = signed_in(MockTransport::new());
    let form = DeckForm {
        name: "Nothing".into(),
        commander: "Someone".into(),
        ..DeckForm::default()
    };
    let err = block_on(decks::create_deck(&api, 7, &form)).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(
        err.describe("Deck creation failed"),
        "Please select at least one color (or Colorless)."
    );
    assert!(api.transport().requests().is_empty());
}

#[test]
fn deck_page_survives_missing_owner() {
    let transport = script(Some(1), &[(1, 1, true)]).respond(
        Method::Get,
        "users/7",
        404,
        r#"{"error":"User not found"}"#,
    );
    let api = signed_in(transport);
    let (snapshot, owner) = block_on(decks::load_deck_page(&api, 4, None)).unwrap();
    assert_eq!(snapshot.deck.name, "Golgari Value");
    assert!(owner.is_none());
}

#[test]
fn history_rows_without_a_result_still_load() {
    let transport = MockTransport::new()
        .respond(Method::Get, "decks/4", 200, &deck_json(Some(1)))
        .respond(Method::Get, "decks/4/versions", 200, &versions_json(&[(1, 1, true)]))
        .respond(
            Method::Get,
            "decks/4/history",
            200,
            r#"[{"game_id":9,"game_date":"2025-03-20","placement":null,"version_number":1},
                {"game_id":8,"game_date":"2025-03-13","placement":2,"version_number":1}]"#,
        )
        .respond(Method::Get, "decks/4/versions/1", 200, &version_detail(1, 1));
    let api = signed_in(transport);
    let snapshot = block_on(load_deck_snapshot(&api, 4, None)).unwrap();
    let placements: Vec<_> = snapshot.history.iter().map(|h| h.placement).collect();
    assert_eq!(placements, [None, Some(2)]);
    assert_eq!(snapshot.selected_version_id, Some(1));
}

#[test]
fn failed_switch_keeps_the_shown_version_selected() {
    let transport = MockTransport::new()
        .respond(Method::Get, "decks/4", 200, &deck_json(Some(1)))
        .respond(
            Method::Get,
            "decks/4/versions",
            200,
            &versions_json(&[(2, 2, false), (1, 1, true)]),
        )
        .respond(Method::Get, "decks/4/history", 200, "[]")
        .respond(Method::Get, "decks/4/versions/1", 200, &version_detail(1, 1))
        .respond(
            Method::Get,
            "decks/4/versions/2",
            500,
            r#"{"error":"Failed to fetch version details"}"#,
        );
    let api = signed_in(transport);
    let shown = block_on(load_deck_snapshot(&api, 4, None)).unwrap();
    let seq = RequestSequence::new();
    let ticket = seq.issue();

    let (after, err) = match block_on(switch_version(&api, &seq, ticket, shown.clone(), 2)) {
        Some(VersionSwitch::Failed(after, err)) => (after, err),
        other => panic!("expected a failed switch, got {other:?}"),
    };
    assert_eq!(after.selected_version_id, Some(1));
    assert_eq!(after.version, shown.version);
    assert_eq!(
        err.describe("Failed to load version details"),
        "Failed to load version details: Failed to fetch version details"
    );
}

#[test]
fn late_version_response_never_overwrites_a_newer_selection() {
    let api = signed_in(script(Some(1), &[(5, 2, false), (2, 2, false), (1, 1, true)]));
    let shown = block_on(load_deck_snapshot(&api, 4, None)).unwrap();
    let seq = RequestSequence::new();

    let first = seq.issue();
    let older = switch_version(&api, &seq, first, shown.clone(), 2);
    let second = seq.issue();
    let newer = switch_version(&api, &seq, second, shown.clone(), 5);

    // The newer request settles first; the older one arrives afterwards.
    let mut state = shown;
    for outcome in [block_on(newer), block_on(older)].into_iter().flatten() {
        state = match outcome {
            VersionSwitch::Loaded(next) | VersionSwitch::Failed(next, _) => next,
        };
    }

    assert_eq!(api.transport().count(Method::Get, "decks/4/versions/2"), 1);
    assert_eq!(api.transport().count(Method::Get, "decks/4/versions/5"), 1);
    assert_eq!(state.selected_version_id, Some(5));
    assert_eq!(state.version.version_id, Some(5));
}
