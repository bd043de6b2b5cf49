// =====
// TESTS: 8
// =====
//
// Chat lifecycle integration tests.
// Sessions, streamed replies, persistence and the overlays that act on them.

use artichat::app::{AppStatus, Overlay};
use artichat::markup::{Artifact, parse_blocks};
use artichat::model::{Message, Role};
use artichat::reply::synthetic_reply;
use artichat::store::{ChatStore, DEFAULT_TITLE, MemoryStore};
use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use std::sync::Arc;

use crate::helpers::{ctrl, drain_reply, press, test_app, test_app_on, type_str};

#[tokio::test]
async fn enter_submits_and_reply_carries_two_artifacts() {
    let mut app = test_app();
    type_str(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.status, AppStatus::Streaming);
    drain_reply(&mut app).await;

    assert_eq!(app.status, AppStatus::Ready);
    assert_eq!(app.messages.len(), 2);
    assert_eq!(app.messages[1].content, synthetic_reply("hello"));
    let artifacts = Artifact::collect(&parse_blocks(&app.messages[1].content));
    assert_eq!(artifacts.len(), 2);

    ctrl(&mut app, 'o');
    assert!(matches!(app.overlay, Some(Overlay::Artifacts(_))));
}

#[tokio::test]
async fn history_survives_restart() {
    let kv = Arc::new(MemoryStore::new());
    let mut app = test_app_on(kv.clone());
    type_str(&mut app, "plan a trip");
    press(&mut app, KeyCode::Enter);
    drain_reply(&mut app).await;
    let session_id = app.current_session.clone();
    drop(app);

    let reopened = test_app_on(kv);
    assert_eq!(reopened.sessions.len(), 1);
    assert_eq!(reopened.sessions[0].title, "plan a trip");
    assert_eq!(reopened.current_session, session_id);
    assert_eq!(reopened.messages.len(), 2);
}

#[tokio::test]
async fn interrupted_reply_is_repaired_on_load() {
    let kv = Arc::new(MemoryStore::new());
    let store = ChatStore::new(kv.clone());
    let session = store.create_session("Half done");
    let mut partial = Message::assistant_placeholder();
    partial.content.push_str("Here's");
    store.save_messages(&session.id, &[Message::user("hi"), partial]);

    let app = test_app_on(kv);
    assert_eq!(app.messages.len(), 2);
    assert!(!app.messages[1].is_streaming);
    assert!(store.messages(&session.id).iter().all(|m| !m.is_streaming));
}

#[tokio::test]
async fn new_chat_mid_stream_keeps_partial_reply() {
    let kv = Arc::new(MemoryStore::new());
    let mut app = test_app_on(kv.clone());
    type_str(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    let first = app.current_session.clone().unwrap();

    ctrl(&mut app, 'n');
    assert_eq!(app.status, AppStatus::Ready);
    assert!(app.reply.is_none());
    assert_eq!(app.sessions.len(), 2);
    assert_eq!(app.sessions[0].title, DEFAULT_TITLE);
    assert!(app.messages.is_empty());

    let saved = ChatStore::new(kv).messages(&first);
    assert_eq!(saved.len(), 2);
    assert!(!saved[1].is_streaming);
}

#[tokio::test]
async fn escape_stops_streaming() {
    let mut app = test_app();
    type_str(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.status, AppStatus::Ready);
    assert!(!app.messages[1].is_streaming);
    assert!(app.messages[1].content.len() < synthetic_reply("hello").len());
}

#[tokio::test]
async fn search_overlay_opens_matching_session() {
    let mut app = test_app();
    type_str(&mut app, "plan a trip");
    press(&mut app, KeyCode::Enter);
    drain_reply(&mut app).await;
    let trip = app.current_session.clone();
    ctrl(&mut app, 'n');
    assert!(app.current_session != trip);

    ctrl(&mut app, 'f');
    type_str(&mut app, "trip");
    let Some(Overlay::Search(search)) = &app.overlay else {
        panic!("search overlay should be open");
    };
    assert_eq!(search.results.len(), 1);
    press(&mut app, KeyCode::Enter);
    assert!(app.overlay.is_none());
    assert_eq!(app.current_session, trip);
    assert_eq!(app.messages.len(), 2);
}

#[tokio::test]
async fn edit_then_resubmit_replaces_tail() {
    let mut app = test_app();
    type_str(&mut app, "first");
    press(&mut app, KeyCode::Enter);
    drain_reply(&mut app).await;

    ctrl(&mut app, 'e');
    assert_eq!(app.input.text(), "first");
    for _ in 0.."first".len() {
        press(&mut app, KeyCode::Backspace);
    }
    type_str(&mut app, "second");
    press(&mut app, KeyCode::Enter);
    drain_reply(&mut app).await;

    let roles: Vec<Role> = app.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert_eq!(app.messages[0].content, "second");
}

#[tokio::test]
async fn export_then_import_into_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut app = test_app();
    type_str(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    drain_reply(&mut app).await;
    app.export_to(&path);
    assert!(path.exists());

    let mut fresh = test_app();
    assert!(fresh.sessions.is_empty());
    fresh.import_from(&path);
    assert_eq!(fresh.sessions, app.sessions);
    assert_eq!(fresh.messages, app.messages);
    let notice = fresh.notice.clone().map(|n| n.text).unwrap_or_default();
    assert_eq!(notice, "Imported 1 chats");
}
