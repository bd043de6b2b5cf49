// =====
// TESTS: 5
// =====
//
// Chat store over the file-backed port.

use artichat::model::{Message, Role};
use artichat::store::{ChatStore, FileStore, KeyValueStore};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn open(dir: &std::path::Path) -> (Arc<FileStore>, ChatStore) {
    let kv = Arc::new(FileStore::open(dir).unwrap());
    (kv.clone(), ChatStore::new(kv))
}

#[test]
fn sessions_and_messages_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let (_, store) = open(dir.path());
    let session = store.create_session("Trip planning");
    store.save_messages(&session.id, &[Message::user("Where to?")]);

    let (_, reopened) = open(dir.path());
    assert_eq!(reopened.sessions(), vec![session.clone()]);
    let messages = reopened.messages(&session.id);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "Where to?");
}

#[test]
fn one_file_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let (_, store) = open(dir.path());
    let session = store.create_session("A");
    store.save_messages(&session.id, &[]);

    assert!(dir.path().join("chat-sessions.json").exists());
    assert!(dir.path().join(format!("chat-messages-{}.json", session.id)).exists());
}

#[test]
fn delete_removes_message_file() {
    let dir = tempfile::tempdir().unwrap();
    let (kv, store) = open(dir.path());
    let keep = store.create_session("Keep");
    let gone = store.create_session("Drop");
    store.save_messages(&gone.id, &[Message::user("bye")]);

    store.delete_session(&gone.id);
    assert_eq!(store.sessions(), vec![keep]);
    assert_eq!(kv.get(&format!("chat-messages-{}", gone.id)).unwrap(), None);
}

#[test]
fn corrupt_index_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (kv, store) = open(dir.path());
    kv.set("chat-sessions", "{not json").unwrap();
    assert!(store.sessions().is_empty());

    let session = store.create_session("Fresh");
    assert_eq!(store.sessions(), vec![session]);
}

#[test]
fn import_keeps_only_well_formed_entries() {
    let dir = tempfile::tempdir().unwrap();
    let (_, store) = open(dir.path());
    store.create_session("Old");

    let json = r#"[
        {"id": "a", "title": "Good", "timestamp": 5, "messages": []},
        {"id": "", "title": "No id", "messages": []},
        {"id": "c", "title": "No messages"},
        {"id": "d", "title": "", "messages": []}
    ]"#;
    assert!(store.import_history(json));
    let titles: Vec<String> = store.sessions().into_iter().map(|s| s.title).collect();
    assert_eq!(titles, vec!["Good"]);

    assert!(!store.import_history(r#"{"id": "a"}"#));
    assert_eq!(store.sessions().len(), 1);
}
