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

use super::autocomplete::AutocompleteState;
use super::events::AppEvent;
use super::input::InputState;
use super::overlay::Overlay;
use crate::model::{Message, SessionSummary};
use crate::reply::CHAR_DELAY;
use crate::search::QueryContext;
use crate::store::ChatStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Construction-time knobs that are not part of the persisted state.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub char_delay: Duration,
    /// Default path offered by export/import prompts.
    pub transfer_path: PathBuf,
    /// Shown in the footer (e.g. "local" or the query server URL).
    pub source_label: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            char_delay: CHAR_DELAY,
            transfer_path: PathBuf::from("artichat-history.json"),
            source_label: "local".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Ready,
    /// An assistant reply is being streamed in.
    Streaming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Sidebar,
    /// Stepping through chat messages to act on one.
    Messages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// The in-flight reply: which message receives characters and how to stop it.
#[derive(Debug)]
pub struct ActiveReply {
    pub session_id: String,
    pub message_id: String,
    pub cancel: CancellationToken,
}

#[derive(Debug, Default)]
pub struct ChatViewport {
    /// First visible wrapped line.
    pub offset: usize,
    /// Follow the bottom while new content arrives.
    pub auto_scroll: bool,
    /// Wrapped line at which each message starts, from the last render.
    pub message_offsets: Vec<(String, usize)>,
    pub max_offset: usize,
}

impl ChatViewport {
    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
        self.auto_scroll = false;
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset);
        if self.offset >= self.max_offset {
            self.auto_scroll = true;
        }
    }

    pub fn engage_auto_scroll(&mut self) {
        self.auto_scroll = true;
    }

    /// Scroll so the message with `id` is at the top, if it was rendered.
    pub fn reveal(&mut self, id: &str) {
        if let Some((_, line)) = self.message_offsets.iter().find(|(mid, _)| mid == id) {
            self.offset = (*line).min(self.max_offset);
            self.auto_scroll = false;
        }
    }
}

pub struct App {
    pub store: ChatStore,
    pub queries: Arc<QueryContext>,
    pub options: AppOptions,
    pub sessions: Vec<SessionSummary>,
    pub current_session: Option<String>,
    pub messages: Vec<Message>,
    pub input: InputState,
    pub autocomplete: AutocompleteState,
    pub status: AppStatus,
    pub focus: Focus,
    pub overlay: Option<Overlay>,
    pub show_sidebar: bool,
    pub sidebar_selected: usize,
    /// Index into `messages` while focus is on the chat.
    pub selected_message: usize,
    pub viewport: ChatViewport,
    pub reply: Option<ActiveReply>,
    /// Index of the user message being edited; the next submit replaces it
    /// and everything after it.
    pub editing: Option<usize>,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    pub spinner_frame: usize,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
    pub event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    /// Build the app and open the most recent session, if any.
    pub fn new(store: ChatStore, queries: Arc<QueryContext>, options: AppOptions) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            store,
            queries,
            options,
            sessions: Vec::new(),
            current_session: None,
            messages: Vec::new(),
            input: InputState::new(),
            autocomplete: AutocompleteState::default(),
            status: AppStatus::Ready,
            focus: Focus::Input,
            overlay: None,
            show_sidebar: true,
            sidebar_selected: 0,
            selected_message: 0,
            viewport: ChatViewport { auto_scroll: true, ..ChatViewport::default() },
            reply: None,
            editing: None,
            notice: None,
            should_quit: false,
            spinner_frame: 0,
            event_tx,
            event_rx,
        };
        app.reload_sessions();
        if let Some(first) = app.sessions.first().map(|s| s.id.clone()) {
            app.open_session(&first);
        }
        app
    }

    pub fn is_streaming(&self) -> bool {
        self.status == AppStatus::Streaming
    }

    pub fn current_summary(&self) -> Option<&SessionSummary> {
        let id = self.current_session.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice { kind: NoticeKind::Info, text: text.into() });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice { kind: NoticeKind::Error, text: text.into() });
    }
}
