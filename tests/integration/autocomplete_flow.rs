// =====
// TESTS: 7
// =====
//
// Autocomplete integration tests.
// Drives the dropdown through key events and background query results.

use artichat::app::{AppEvent, AutocompleteMode, handle_app_event, tick};
use artichat::search::{QueryKey, QueryResults};
use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::helpers::{FailingSource, app_with_source, press, settle_query, test_app, type_str};

fn labels(app: &artichat::app::App) -> Vec<String> {
    app.autocomplete
        .results
        .as_ref()
        .map(|r| r.labels().into_iter().map(str::to_owned).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn mention_lookup_fills_dropdown_and_accept_replaces_token() {
    let mut app = test_app();
    type_str(&mut app, "hi @lee");
    assert!(matches!(app.autocomplete.mode, AutocompleteMode::Mention(_)));
    settle_query(&mut app).await;

    let names = labels(&app);
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "Alex Lee");
    assert_eq!(names[1], "Jordan Lee");

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input.text(), "hi @Jordan Lee");
    assert_eq!(app.input.cursor_offset(), 14);
    assert!(!app.autocomplete.is_open());
    assert!(app.messages.is_empty());
}

#[tokio::test]
async fn suggestions_wait_for_debounce() {
    let mut app = test_app();
    type_str(&mut app, "debu");
    assert!(!app.autocomplete.is_open());

    tick(&mut app, Instant::now() + Duration::from_millis(300));
    assert!(app.autocomplete.is_open());
    settle_query(&mut app).await;
    assert_eq!(labels(&app), vec!["debug error"]);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.input.text(), "debug error");
    assert!(!app.autocomplete.is_open());
}

#[tokio::test]
async fn escape_dismisses_until_next_edit() {
    let mut app = test_app();
    type_str(&mut app, "@lee");
    settle_query(&mut app).await;
    assert!(app.autocomplete.is_open());

    press(&mut app, KeyCode::Esc);
    assert!(!app.autocomplete.is_open());
    assert_eq!(app.input.text(), "@lee");

    press(&mut app, KeyCode::Backspace);
    assert!(app.autocomplete.is_open());
    assert_eq!(app.autocomplete.active_key(), Some(&QueryKey::People("le".to_owned())));
}

#[tokio::test]
async fn bare_at_has_no_results_and_tab_is_consumed() {
    let mut app = test_app();
    type_str(&mut app, "@");
    settle_query(&mut app).await;
    assert!(app.autocomplete.is_open());
    assert_eq!(app.autocomplete.result_count(), 0);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.input.text(), "@");
    assert_eq!(app.focus, artichat::app::Focus::Input);
}

#[tokio::test]
async fn stale_results_are_dropped() {
    let mut app = test_app();
    type_str(&mut app, "@lee");
    settle_query(&mut app).await;

    let stale = AppEvent::QueryFinished {
        key: QueryKey::People("old".to_owned()),
        result: Ok(QueryResults::People(Vec::new())),
    };
    handle_app_event(&mut app, stale);
    assert_eq!(app.autocomplete.result_count(), 10);
}

#[tokio::test]
async fn repeated_query_is_answered_from_cache() {
    let mut app = test_app();
    type_str(&mut app, "@lee");
    settle_query(&mut app).await;

    for _ in 0..4 {
        press(&mut app, KeyCode::Backspace);
    }
    type_str(&mut app, "@lee");
    assert!(!app.autocomplete.loading);
    assert_eq!(app.autocomplete.result_count(), 10);
}

#[tokio::test]
async fn failing_source_shows_error_row() {
    let kv = Arc::new(artichat::store::MemoryStore::new());
    let mut app = app_with_source(kv, Arc::new(FailingSource));
    type_str(&mut app, "@lee");
    settle_query(&mut app).await;
    assert!(app.autocomplete.results.is_none());
    let error = app.autocomplete.error.clone().unwrap_or_default();
    assert!(error.contains("503"), "unexpected error: {error}");
}
