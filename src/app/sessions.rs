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

//! Session lifecycle on the app: open, create, delete, rename, clear,
//! export and import.

use super::App;
use crate::model::Message;
use crate::store::DEFAULT_TITLE;
use std::path::Path;

impl App {
    pub fn reload_sessions(&mut self) {
        self.sessions = self.store.sessions();
        if self.sidebar_selected >= self.sessions.len() {
            self.sidebar_selected = self.sessions.len().saturating_sub(1);
        }
    }

    /// Make `id` the current session and load its messages. An in-flight
    /// reply is stopped and saved first.
    pub fn open_session(&mut self, id: &str) {
        if self.current_session.as_deref() == Some(id) {
            return;
        }
        self.cancel_reply();
        let mut messages = self.store.messages(id);
        // A reply interrupted by a crash stays flagged on disk.
        let mut repaired = false;
        for message in messages.iter_mut().filter(|m| m.is_streaming) {
            message.is_streaming = false;
            repaired = true;
        }
        if repaired {
            self.store.save_messages(id, &messages);
        }
        tracing::debug!(session_id = id, messages = messages.len(), "opened session");
        self.current_session = Some(id.to_owned());
        self.messages = messages;
        self.editing = None;
        if let Some(pos) = self.sessions.iter().position(|s| s.id == id) {
            self.sidebar_selected = pos;
        }
        self.viewport.offset = 0;
        self.viewport.engage_auto_scroll();
    }

    /// Create an empty session and switch to it.
    pub fn new_session(&mut self) -> String {
        self.cancel_reply();
        let session = self.store.create_session(DEFAULT_TITLE);
        let id = session.id.clone();
        self.reload_sessions();
        self.open_session(&id);
        id
    }

    /// Delete `id`; when it was open, fall back to the newest remaining one.
    pub fn delete_session(&mut self, id: &str) {
        let was_current = self.current_session.as_deref() == Some(id);
        if was_current {
            self.cancel_reply();
        }
        self.store.delete_session(id);
        self.reload_sessions();
        if was_current {
            self.current_session = None;
            self.messages.clear();
            self.editing = None;
            if let Some(next) = self.sessions.first().map(|s| s.id.clone()) {
                self.open_session(&next);
            }
        }
        self.info("Chat deleted");
    }

    pub fn rename_session(&mut self, id: &str, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        self.store.update_session_title(id, title);
        self.reload_sessions();
    }

    pub fn clear_history(&mut self) {
        self.cancel_reply();
        self.store.clear_all_history();
        self.reload_sessions();
        self.current_session = None;
        self.messages.clear();
        self.editing = None;
        self.sidebar_selected = 0;
        self.info("History cleared");
    }

    /// Write the export JSON to `path`.
    pub fn export_to(&mut self, path: &Path) {
        self.persist_messages();
        let json = self.store.export_history();
        match std::fs::write(path, json) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "exported history");
                self.info(format!("Exported {} chats to {}", self.sessions.len(), path.display()));
            }
            Err(err) => {
                tracing::error!("Error writing export {}: {err}", path.display());
                self.error(format!("Export failed: {err}"));
            }
        }
    }

    /// Replace the history with the export at `path`.
    pub fn import_from(&mut self, path: &Path) {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!("Error reading import {}: {err}", path.display());
                self.error(format!("Import failed: {err}"));
                return;
            }
        };
        self.cancel_reply();
        if !self.store.import_history(&json) {
            self.error("Import failed: file is not a chat history export");
            return;
        }
        self.reload_sessions();
        self.current_session = None;
        self.messages.clear();
        self.editing = None;
        if let Some(first) = self.sessions.first().map(|s| s.id.clone()) {
            self.open_session(&first);
        }
        self.info(format!("Imported {} chats", self.sessions.len()));
    }

    /// Save the open session's messages.
    pub fn persist_messages(&self) {
        if let Some(id) = &self.current_session {
            self.store.save_messages(id, &self.messages);
        }
    }

    pub fn message_index(&self, id: &str) -> Option<usize> {
        self.messages.iter().position(|m| m.id == id)
    }

    pub fn message_mut(&mut self, id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppOptions;
    use crate::model::Role;
    use crate::search::{LocalSource, QueryContext};
    use crate::store::{ChatStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn app_with(store: &ChatStore) -> App {
        let queries = Arc::new(QueryContext::new(Arc::new(LocalSource::instant())));
        App::new(store.clone(), queries, AppOptions::default())
    }

    #[test]
    fn startup_opens_newest_session_and_repairs_streaming_flags() {
        let store = ChatStore::new(Arc::new(MemoryStore::new()));
        let old = store.create_session("old");
        let newest = store.create_session("newest");
        let mut reply = Message::assistant_placeholder();
        reply.content = "partial".to_owned();
        store.save_messages(&newest.id, &[Message::user("hi"), reply]);

        let app = app_with(&store);
        assert_eq!(app.current_session.as_deref(), Some(newest.id.as_str()));
        assert!(app.messages.iter().all(|m| !m.is_streaming));
        assert!(store.messages(&newest.id).iter().all(|m| !m.is_streaming));
        assert_eq!(app.sessions.len(), 2);
        assert_eq!(app.sessions[1].id, old.id);
    }

    #[test]
    fn deleting_current_session_falls_back_to_next() {
        let store = ChatStore::new(Arc::new(MemoryStore::new()));
        let first = store.create_session("first");
        let mut app = app_with(&store);
        let second = app.new_session();
        assert_eq!(app.current_session.as_deref(), Some(second.as_str()));

        app.delete_session(&second);
        assert_eq!(app.current_session.as_deref(), Some(first.id.as_str()));
        assert_eq!(app.sessions.len(), 1);
    }

    #[test]
    fn blank_rename_is_ignored() {
        let store = ChatStore::new(Arc::new(MemoryStore::new()));
        let mut app = app_with(&store);
        let id = app.new_session();
        app.rename_session(&id, "   ");
        assert_eq!(app.sessions[0].title, DEFAULT_TITLE);
        app.rename_session(&id, " Trip ");
        assert_eq!(app.sessions[0].title, "Trip");
    }

    #[test]
    fn export_then_import_restores_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = ChatStore::new(Arc::new(MemoryStore::new()));
        let mut app = app_with(&store);
        let id = app.new_session();
        app.messages.push(Message::user("remember me"));
        app.export_to(&path);

        app.clear_history();
        assert!(app.sessions.is_empty());
        assert!(app.current_session.is_none());

        app.import_from(&path);
        assert_eq!(app.current_session.as_deref(), Some(id.as_str()));
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].role, Role::User);
    }

    #[test]
    fn importing_non_array_keeps_history_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"not":"an array"}"#).unwrap();
        let store = ChatStore::new(Arc::new(MemoryStore::new()));
        let mut app = app_with(&store);
        app.new_session();
        app.import_from(&path);
        assert_eq!(app.sessions.len(), 1);
        assert!(app.notice.as_ref().is_some_and(|n| n.text.starts_with("Import failed")));
    }
}
