// artichat — A terminal chat demo with inline artifacts
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Chat session store over a [`KeyValueStore`].
//!
//! Storage failures never reach the caller: they are logged and the
//! operation degrades to an empty result or a no-op.

use super::kv::{KeyValueStore, StorageError};
use crate::model::{Message, Session, SessionSummary, new_id, now_millis};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub const SESSIONS_KEY: &str = "chat-sessions";
pub const MESSAGES_PREFIX: &str = "chat-messages-";
pub const DEFAULT_TITLE: &str = "New Chat";

pub fn messages_key(session_id: &str) -> String {
    format!("{MESSAGES_PREFIX}{session_id}")
}

#[derive(Clone)]
pub struct ChatStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ChatStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt { key: key.to_owned(), source })
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|source| StorageError::Encode { key: key.to_owned(), source })?;
        self.kv.set(key, &raw)
    }

    /// Session index, newest first.
    pub fn sessions(&self) -> Vec<SessionSummary> {
        self.read(SESSIONS_KEY)
            .unwrap_or_else(|err| {
                tracing::error!("Error reading sessions: {err}");
                None
            })
            .unwrap_or_default()
    }

    pub fn save_sessions(&self, sessions: &[SessionSummary]) {
        if let Err(err) = self.write(SESSIONS_KEY, sessions) {
            tracing::error!("Error saving sessions: {err}");
        }
    }

    /// Create a session and put it at the top of the index.
    pub fn create_session(&self, title: &str) -> SessionSummary {
        let title = if title.trim().is_empty() { DEFAULT_TITLE } else { title };
        let session =
            SessionSummary { id: new_id(), title: title.to_owned(), timestamp: now_millis() };
        let mut sessions = self.sessions();
        sessions.insert(0, session.clone());
        self.save_sessions(&sessions);
        tracing::debug!(session_id = %session.id, "created session");
        session
    }

    pub fn messages(&self, session_id: &str) -> Vec<Message> {
        self.read(&messages_key(session_id))
            .unwrap_or_else(|err| {
                tracing::error!("Error reading messages: {err}");
                None
            })
            .unwrap_or_default()
    }

    pub fn save_messages(&self, session_id: &str, messages: &[Message]) {
        if let Err(err) = self.write(&messages_key(session_id), messages) {
            tracing::error!("Error saving messages: {err}");
        }
    }

    /// No-op for unknown sessions.
    pub fn update_session_title(&self, session_id: &str, title: &str) {
        let mut sessions = self.sessions();
        let Some(session) = sessions.iter_mut().find(|s| s.id == session_id) else {
            return;
        };
        session.title = title.to_owned();
        self.save_sessions(&sessions);
    }

    /// Drops the session from the index along with its messages.
    pub fn delete_session(&self, session_id: &str) {
        let sessions: Vec<SessionSummary> =
            self.sessions().into_iter().filter(|s| s.id != session_id).collect();
        self.save_sessions(&sessions);
        if let Err(err) = self.kv.remove(&messages_key(session_id)) {
            tracing::error!("Error deleting session: {err}");
        }
    }

    pub fn clear_all_history(&self) {
        for session in self.sessions() {
            if let Err(err) = self.kv.remove(&messages_key(&session.id)) {
                tracing::error!("Error clearing history: {err}");
            }
        }
        if let Err(err) = self.kv.remove(SESSIONS_KEY) {
            tracing::error!("Error clearing history: {err}");
        }
    }

    /// Every session with its messages as a pretty-printed JSON array.
    /// Empty string if serialization fails.
    pub fn export_history(&self) -> String {
        let full: Vec<Session> = self
            .sessions()
            .into_iter()
            .map(|s| {
                let messages = self.messages(&s.id);
                Session { id: s.id, title: s.title, timestamp: s.timestamp, messages }
            })
            .collect();
        serde_json::to_string_pretty(&full).unwrap_or_else(|err| {
            tracing::error!("Error exporting history: {err}");
            String::new()
        })
    }

    /// Replace the session index with the well-formed entries of an exported
    /// array. Returns `false` only when the payload is not a JSON array.
    pub fn import_history(&self, json: &str) -> bool {
        let entries = match serde_json::from_str::<serde_json::Value>(json) {
            Ok(serde_json::Value::Array(entries)) => entries,
            Ok(_) => {
                tracing::warn!("Import rejected: payload is not an array");
                return false;
            }
            Err(err) => {
                tracing::error!("Error importing history: {err}");
                return false;
            }
        };

        let total = entries.len();
        let mut index = Vec::with_capacity(total);
        for entry in entries {
            let Some(session) = validate_entry(entry) else {
                continue;
            };
            self.save_messages(&session.id, &session.messages);
            index.push(session.summary());
        }
        if index.len() < total {
            tracing::warn!(skipped = total - index.len(), "Skipped malformed import entries");
        }
        self.save_sessions(&index);
        true
    }
}

fn validate_entry(entry: serde_json::Value) -> Option<Session> {
    let session: Session = serde_json::from_value(entry).ok()?;
    (!session.id.is_empty() && !session.title.is_empty()).then_some(session)
}

#[cfg(test)]
mod tests {
    // =====
    // TESTS: 11
    // =====

    use super::*;
    use crate::model::Role;
    use crate::store::kv::MemoryStore;
    use pretty_assertions::assert_eq;

    fn store() -> (Arc<MemoryStore>, ChatStore) {
        let kv = Arc::new(MemoryStore::new());
        (kv.clone(), ChatStore::new(kv))
    }

    /// Port whose every operation fails.
    struct Broken;

    impl KeyValueStore for Broken {
        fn get(&self, _: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_owned()))
        }
        fn set(&self, _: &str, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_owned()))
        }
        fn remove(&self, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_owned()))
        }
        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_owned()))
        }
    }

    #[test]
    fn create_session_prepends_to_index() {
        let (_, store) = store();
        let first = store.create_session("First");
        let second = store.create_session("");
        let ids: Vec<String> = store.sessions().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id]);
        assert_eq!(second.title, DEFAULT_TITLE);
    }

    #[test]
    fn messages_round_trip_under_prefixed_key() {
        let (kv, store) = store();
        let session = store.create_session("S");
        store.save_messages(&session.id, &[Message::user("hi")]);
        assert_eq!(store.messages(&session.id)[0].content, "hi");
        assert!(kv.get(&format!("chat-messages-{}", session.id)).unwrap().is_some());
    }

    #[test]
    fn unknown_session_has_no_messages() {
        let (_, store) = store();
        assert!(store.messages("missing").is_empty());
    }

    #[test]
    fn update_title_only_touches_target() {
        let (_, store) = store();
        let a = store.create_session("A");
        let b = store.create_session("B");
        store.update_session_title(&a.id, "Renamed");
        store.update_session_title("missing", "X");
        let titles: Vec<String> = store.sessions().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["B", "Renamed"]);
        assert_eq!(store.sessions()[0].id, b.id);
    }

    #[test]
    fn delete_cascades_to_messages() {
        let (kv, store) = store();
        let session = store.create_session("S");
        store.save_messages(&session.id, &[Message::user("hi")]);
        store.delete_session(&session.id);
        assert!(store.sessions().is_empty());
        assert_eq!(kv.get(&messages_key(&session.id)).unwrap(), None);
    }

    #[test]
    fn clear_all_history_empties_the_port() {
        let (kv, store) = store();
        for title in ["a", "b"] {
            let s = store.create_session(title);
            store.save_messages(&s.id, &[Message::user(title)]);
        }
        store.clear_all_history();
        assert!(kv.is_empty());
    }

    #[test]
    fn corrupt_index_degrades_to_empty() {
        let (kv, store) = store();
        kv.set(SESSIONS_KEY, "{not json").unwrap();
        assert!(store.sessions().is_empty());
    }

    #[test]
    fn failing_port_never_panics() {
        let store = ChatStore::new(Arc::new(Broken));
        assert!(store.sessions().is_empty());
        let created = store.create_session("x");
        assert_eq!(created.title, "x");
        store.save_messages(&created.id, &[Message::user("m")]);
        assert!(store.messages(&created.id).is_empty());
        store.update_session_title(&created.id, "y");
        store.delete_session(&created.id);
        store.clear_all_history();
        assert_eq!(store.export_history(), "[]");
        assert!(store.import_history("[]"));
    }

    #[test]
    fn export_then_import_restores_history() {
        let (_, source) = store();
        let session = source.create_session("Trip");
        let mut reply = Message::assistant_placeholder();
        reply.content = "plan".to_owned();
        reply.is_streaming = false;
        source.save_messages(&session.id, &[Message::user("trip?"), reply]);
        let exported = source.export_history();
        assert!(exported.contains("\n  {"), "export is pretty printed");

        let (_, target) = store();
        assert!(target.import_history(&exported));
        assert_eq!(target.sessions(), source.sessions());
        let messages = target.messages(&session.id);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Assistant);
    }

    #[test]
    fn import_rejects_non_arrays() {
        let (_, store) = store();
        assert!(!store.import_history(r#"{"id":"x"}"#));
        assert!(!store.import_history("not json"));
    }

    #[test]
    fn import_skips_malformed_entries_and_overwrites_index() {
        let (_, store) = store();
        store.create_session("old");
        let payload = r#"[
            {"id": "ok", "title": "Good", "timestamp": 7, "messages": []},
            {"id": "", "title": "No id", "messages": []},
            {"id": "t", "title": "", "messages": []},
            {"id": "m", "title": "Bad messages", "messages": "nope"},
            {"id": "n", "title": "Missing messages"},
            42
        ]"#;
        assert!(store.import_history(payload));
        let sessions = store.sessions();
        assert_eq!(
            sessions,
            vec![SessionSummary { id: "ok".to_owned(), title: "Good".to_owned(), timestamp: 7 }]
        );
    }
}
