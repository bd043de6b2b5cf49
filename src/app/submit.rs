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

//! Sending messages and driving the streamed assistant reply.

use super::events::AppEvent;
use super::state::{ActiveReply, AppStatus};
use super::App;
use crate::model::{Message, Prompt, Role};
use crate::reply::{reply_stream, synthetic_reply};
use crate::store::{DEFAULT_TITLE, generate_session_title};
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

impl App {
    /// Send the input buffer. Blank input and input sent while a reply is
    /// streaming are ignored. Creates a session when none is open.
    pub fn submit(&mut self) {
        let text = self.input.text();
        if text.trim().is_empty() || self.is_streaming() {
            return;
        }
        let truncate_at = self.editing.take();
        self.send(&text, truncate_at);
        self.input.clear();
        self.autocomplete.reset();
        self.notice = None;
    }

    /// Append `text` as a user message, dropping everything from
    /// `truncate_at` onward first, and start the reply.
    fn send(&mut self, text: &str, truncate_at: Option<usize>) {
        let session_id = match self.current_session.clone() {
            Some(id) => id,
            None => self.new_session(),
        };

        if let Some(index) = truncate_at {
            self.messages.truncate(index);
        }
        let first_user_message = !self.messages.iter().any(|m| m.role == Role::User);
        self.messages.push(Message::user(text));
        if first_user_message
            && self.current_summary().is_some_and(|s| s.title == DEFAULT_TITLE)
        {
            let title = generate_session_title(text);
            self.store.update_session_title(&session_id, &title);
            self.reload_sessions();
        }
        self.begin_reply(&session_id, text);
    }

    /// Regenerate the newest assistant reply.
    pub fn regenerate(&mut self) {
        match self.messages.iter().rposition(|m| m.role == Role::Assistant) {
            Some(index) => self.regenerate_at(index),
            None => self.info("Nothing to regenerate"),
        }
    }

    /// Drop the assistant reply at `index` and everything after it, then
    /// stream a fresh reply to the user message right before it.
    pub fn regenerate_at(&mut self, index: usize) {
        if self.is_streaming() {
            return;
        }
        let Some(session_id) = self.current_session.clone() else {
            return;
        };
        if self.messages.get(index).is_none_or(|m| m.role != Role::Assistant) {
            return;
        }
        let prompt = match index.checked_sub(1).and_then(|i| self.messages.get(i)) {
            Some(m) if m.role == Role::User => m.content.clone(),
            _ => {
                self.info("No message to regenerate from");
                return;
            }
        };
        self.messages.truncate(index);
        self.begin_reply(&session_id, &prompt);
    }

    /// Edit the newest user message.
    pub fn start_edit(&mut self) {
        if let Some(index) = self.messages.iter().rposition(|m| m.role == Role::User) {
            self.edit_at(index);
        }
    }

    /// Load the user message at `index` into the input; the next submit
    /// replaces it and everything after it.
    pub fn edit_at(&mut self, index: usize) {
        if self.is_streaming() {
            return;
        }
        let Some(content) = self.user_content(index) else {
            return;
        };
        self.input.set_text(&content);
        self.autocomplete.reset();
        self.editing = Some(index);
        self.info("Editing message (Esc to cancel)");
    }

    /// Send the user message at `index` again unchanged, dropping it and
    /// everything after it.
    pub fn resubmit_at(&mut self, index: usize) {
        if self.is_streaming() {
            return;
        }
        let Some(content) = self.user_content(index) else {
            return;
        };
        self.cancel_edit();
        self.send(&content, Some(index));
    }

    fn user_content(&self, index: usize) -> Option<String> {
        self.messages.get(index).filter(|m| m.role == Role::User).map(|m| m.content.clone())
    }

    pub fn cancel_edit(&mut self) {
        if self.editing.take().is_some() {
            self.input.clear();
            self.autocomplete.reset();
            self.notice = None;
        }
    }

    /// Replace the input buffer with a prompt template.
    pub fn apply_prompt(&mut self, prompt: &Prompt) {
        self.input.set_text(prompt.content);
        self.autocomplete.reset();
    }

    fn begin_reply(&mut self, session_id: &str, prompt: &str) {
        let placeholder = Message::assistant_placeholder();
        let message_id = placeholder.id.clone();
        self.messages.push(placeholder);
        self.store.save_messages(session_id, &self.messages);
        self.viewport.engage_auto_scroll();

        let cancel = CancellationToken::new();
        let stream = reply_stream(synthetic_reply(prompt), self.options.char_delay, cancel.clone());
        let tx = self.event_tx.clone();
        let task_message_id = message_id.clone();
        tokio::spawn(async move {
            futures::pin_mut!(stream);
            while let Some(ch) = stream.next().await {
                let event = AppEvent::ReplyChunk { message_id: task_message_id.clone(), ch };
                if tx.send(event).is_err() {
                    return;
                }
            }
            let _ = tx.send(AppEvent::ReplyDone { message_id: task_message_id });
        });

        tracing::debug!(session_id, message_id = %message_id, "reply started");
        self.reply = Some(ActiveReply { session_id: session_id.to_owned(), message_id, cancel });
        self.status = AppStatus::Streaming;
    }

    /// Append a streamed character. Characters of a reply that is no longer
    /// active are dropped.
    pub fn on_reply_chunk(&mut self, message_id: &str, ch: char) {
        if self.reply.as_ref().is_none_or(|r| r.message_id != message_id) {
            return;
        }
        if let Some(message) = self.message_mut(message_id) {
            message.content.push(ch);
        }
    }

    pub fn on_reply_done(&mut self, message_id: &str) {
        if self.reply.as_ref().is_none_or(|r| r.message_id != message_id) {
            return;
        }
        tracing::debug!(message_id, "reply finished");
        self.finish_reply();
    }

    /// Stop the in-flight reply, keeping what has streamed so far.
    pub fn cancel_reply(&mut self) {
        if let Some(reply) = &self.reply {
            tracing::debug!(message_id = %reply.message_id, "reply cancelled");
            reply.cancel.cancel();
            self.finish_reply();
        }
    }

    fn finish_reply(&mut self) {
        let Some(reply) = self.reply.take() else {
            return;
        };
        if let Some(message) = self.message_mut(&reply.message_id) {
            message.is_streaming = false;
        }
        if self.current_session.as_deref() == Some(reply.session_id.as_str()) {
            self.store.save_messages(&reply.session_id, &self.messages);
        }
        self.status = AppStatus::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppOptions;
    use crate::search::{LocalSource, QueryContext};
    use crate::store::{ChatStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_app() -> App {
        let store = ChatStore::new(Arc::new(MemoryStore::new()));
        let queries = Arc::new(QueryContext::new(Arc::new(LocalSource::instant())));
        let options = AppOptions { char_delay: Duration::ZERO, ..AppOptions::default() };
        App::new(store, queries, options)
    }

    async fn drain(app: &mut App) {
        while app.is_streaming() {
            let Some(event) = app.event_rx.recv().await else {
                break;
            };
            match event {
                AppEvent::ReplyChunk { message_id, ch } => app.on_reply_chunk(&message_id, ch),
                AppEvent::ReplyDone { message_id } => app.on_reply_done(&message_id),
                AppEvent::QueryFinished { .. } => {}
            }
        }
    }

    #[tokio::test]
    async fn submit_creates_session_titles_it_and_streams_reply() {
        let mut app = test_app();
        app.input.set_text("Plan a **trip**");
        app.submit();
        assert!(app.input.is_empty());
        assert_eq!(app.status, AppStatus::Streaming);
        assert_eq!(app.sessions[0].title, "Plan a trip");

        drain(&mut app).await;
        assert_eq!(app.messages.len(), 2);
        assert_eq!(app.messages[1].content, synthetic_reply("Plan a **trip**"));
        assert!(!app.messages[1].is_streaming);
        let id = app.current_session.clone().unwrap();
        assert_eq!(app.store.messages(&id), app.messages);
    }

    #[tokio::test]
    async fn blank_submit_is_ignored() {
        let mut app = test_app();
        app.input.set_text("   ");
        app.submit();
        assert!(app.current_session.is_none());
        assert!(app.messages.is_empty());
    }

    #[tokio::test]
    async fn cancel_keeps_partial_reply_and_ignores_late_chunks() {
        let mut app = test_app();
        app.input.set_text("hello");
        app.submit();
        let message_id = app.messages[1].id.clone();
        app.on_reply_chunk(&message_id, 'H');
        app.cancel_reply();
        app.on_reply_chunk(&message_id, 'X');
        assert_eq!(app.status, AppStatus::Ready);
        assert_eq!(app.messages[1].content, "H");
        assert!(!app.messages[1].is_streaming);
    }

    #[tokio::test]
    async fn regenerate_replaces_last_reply() {
        let mut app = test_app();
        app.input.set_text("first");
        app.submit();
        drain(&mut app).await;
        let old_id = app.messages[1].id.clone();

        app.regenerate();
        drain(&mut app).await;
        assert_eq!(app.messages.len(), 2);
        assert!(app.messages[1].id != old_id);
        assert_eq!(app.messages[1].content, synthetic_reply("first"));
    }

    #[tokio::test]
    async fn edit_truncates_from_edited_message() {
        let mut app = test_app();
        app.input.set_text("one");
        app.submit();
        drain(&mut app).await;
        app.input.set_text("two");
        app.submit();
        drain(&mut app).await;
        assert_eq!(app.messages.len(), 4);

        app.start_edit();
        assert_eq!(app.input.text(), "two");
        assert_eq!(app.editing, Some(2));
        app.input.set_text("three");
        app.submit();
        drain(&mut app).await;
        let contents: Vec<&str> = app
            .messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["one", "three"]);
        assert_eq!(app.messages.len(), 4);
        assert_eq!(app.sessions[0].title, "one");
    }

    async fn chat_of(app: &mut App, prompts: &[&str]) {
        for prompt in prompts {
            app.input.set_text(prompt);
            app.submit();
            drain(app).await;
        }
    }

    fn user_contents(app: &App) -> Vec<&str> {
        app.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .collect()
    }

    #[tokio::test]
    async fn regenerate_in_the_middle_truncates_later_turns() {
        let mut app = test_app();
        chat_of(&mut app, &["one", "two", "three"]).await;
        assert_eq!(app.messages.len(), 6);

        app.regenerate_at(3);
        drain(&mut app).await;
        assert_eq!(app.messages.len(), 4);
        assert_eq!(user_contents(&app), vec!["one", "two"]);
        assert_eq!(app.messages[3].content, synthetic_reply("two"));
        let id = app.current_session.clone().unwrap();
        assert_eq!(app.store.messages(&id), app.messages);
    }

    #[tokio::test]
    async fn regenerate_ignores_user_messages() {
        let mut app = test_app();
        chat_of(&mut app, &["one"]).await;
        let before = app.messages.clone();
        app.regenerate_at(0);
        app.regenerate_at(7);
        assert!(!app.is_streaming());
        assert_eq!(app.messages, before);
    }

    #[tokio::test]
    async fn regenerate_without_preceding_prompt_sets_notice() {
        let mut app = test_app();
        chat_of(&mut app, &["one"]).await;
        app.messages.remove(0);

        app.regenerate();
        assert!(!app.is_streaming());
        assert_eq!(app.messages.len(), 1);
        assert_eq!(
            app.notice.as_ref().map(|n| n.text.as_str()),
            Some("No message to regenerate from")
        );
    }

    #[tokio::test]
    async fn edit_in_the_middle_replaces_from_that_message() {
        let mut app = test_app();
        chat_of(&mut app, &["one", "two", "three"]).await;

        app.edit_at(2);
        assert_eq!(app.input.text(), "two");
        assert_eq!(app.editing, Some(2));
        app.input.set_text("deux");
        app.submit();
        drain(&mut app).await;
        assert_eq!(user_contents(&app), vec!["one", "deux"]);
        assert_eq!(app.messages.len(), 4);
    }

    #[tokio::test]
    async fn resubmit_sends_the_same_text_again() {
        let mut app = test_app();
        chat_of(&mut app, &["one", "two", "three"]).await;
        let old_id = app.messages[0].id.clone();

        app.resubmit_at(0);
        drain(&mut app).await;
        assert_eq!(user_contents(&app), vec!["one"]);
        assert_eq!(app.messages.len(), 2);
        assert!(app.messages[0].id != old_id);
        assert_eq!(app.messages[1].content, synthetic_reply("one"));
        assert_eq!(app.sessions[0].title, "one");
    }

    #[tokio::test]
    async fn resubmit_drops_a_pending_edit() {
        let mut app = test_app();
        chat_of(&mut app, &["one", "two"]).await;
        app.start_edit();
        assert_eq!(app.editing, Some(2));

        app.resubmit_at(0);
        drain(&mut app).await;
        assert_eq!(app.editing, None);
        assert!(app.input.is_empty());
        assert_eq!(user_contents(&app), vec!["one"]);
    }
}
