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

use super::App;
use crate::search::{QueryError, QueryKey, QueryResults};
use crossterm::event::{Event, KeyEventKind};
use std::sync::Arc;
use std::time::Instant;

/// Messages from background tasks back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    QueryFinished { key: QueryKey, result: Result<QueryResults, QueryError> },
    ReplyChunk { message_id: String, ch: char },
    ReplyDone { message_id: String },
}

pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::QueryFinished { key, result } => {
            if let Err(err) = &result {
                tracing::warn!(query = key.text(), "autocomplete query failed: {err}");
            }
            app.autocomplete.apply(&key, result);
        }
        AppEvent::ReplyChunk { message_id, ch } => app.on_reply_chunk(&message_id, ch),
        AppEvent::ReplyDone { message_id } => app.on_reply_done(&message_id),
    }
}

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            super::keys::dispatch_key(app, key);
        }
        Event::Paste(text) => {
            if let Some(prompt) = super::keys::text_prompt_mut(app) {
                prompt.value.push_str(&text.replace(['\r', '\n'], " "));
            } else if app.overlay.is_none() {
                app.input.insert_str(&text);
                input_edited(app);
            }
        }
        // Resize is handled automatically by ratatui
        _ => {}
    }
}

/// Per-frame housekeeping: promote debounced input and keep the dropdown's
/// query in step with the input.
pub fn tick(app: &mut App, now: Instant) {
    if app.autocomplete.tick(now) {
        sync_query(app);
    }
}

/// Call after every edit of the input buffer.
pub fn input_edited(app: &mut App) {
    let text = app.input.text();
    let cursor = app.input.cursor_offset();
    app.autocomplete.on_input_changed(&text, cursor, Instant::now());
    sync_query(app);
}

/// Start the dropdown's query if it changed. Fresh cache entries answer
/// immediately; otherwise a task fetches and reports `QueryFinished`.
pub fn sync_query(app: &mut App) {
    let Some(key) = app.autocomplete.query_key() else {
        if app.autocomplete.active_key().is_some() {
            app.autocomplete.clear_results();
        }
        return;
    };
    if app.autocomplete.active_key() == Some(&key) {
        return;
    }
    let cached = app.queries.cached(&key);
    if !app.autocomplete.begin(key.clone(), cached) {
        return;
    }
    let queries = Arc::clone(&app.queries);
    let tx = app.event_tx.clone();
    tokio::spawn(async move {
        let result = queries.fetch(&key).await;
        let _ = tx.send(AppEvent::QueryFinished { key, result });
    });
}
