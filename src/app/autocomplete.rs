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

//! Input autocomplete: `@`-mention detection, debounced word suggestions and
//! the dropdown state machine.
//!
//! The state here is pure. The app owns dispatching the query for
//! [`AutocompleteState::query_key`] and feeding the answer back through
//! [`AutocompleteState::apply`].

use crate::search::{QueryError, QueryKey, QueryResults};
use regex::Regex;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

/// Quiet period before free-text input becomes a suggestion query.
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// Maximum rows shown in the dropdown.
pub const MAX_VISIBLE: usize = 8;

#[allow(clippy::expect_used)]
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)(@[^\s@]*)$").expect("MENTION is a valid regex"));

/// An `@token` ending at the cursor. Offsets are chars into the full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionToken {
    pub token: String,
    pub start: usize,
    pub end: usize,
}

impl MentionToken {
    /// Token text without its `@` prefix.
    pub fn query(&self) -> &str {
        self.token.trim_start_matches('@')
    }
}

/// Detect a mention token ending exactly at char offset `cursor`.
pub fn detect_mention(text: &str, cursor: usize) -> Option<MentionToken> {
    let byte_end = text.char_indices().nth(cursor).map_or(text.len(), |(i, _)| i);
    let left = &text[..byte_end];
    let caps = MENTION.captures(left)?;
    let token = caps.get(2)?.as_str().to_owned();
    let end = left.chars().count();
    let start = end - token.chars().count();
    Some(MentionToken { token, start, end })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteMode {
    Mention(MentionToken),
    Suggestion,
}

/// New input buffer and cursor after accepting a dropdown item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub cursor: usize,
}

#[derive(Debug)]
pub struct AutocompleteState {
    pub mode: AutocompleteMode,
    /// Input text as of the last elapsed debounce window.
    pub debounced: String,
    pending: Option<(String, Instant)>,
    /// Closed by Escape or a selection; cleared by the next edit.
    dismissed: bool,
    pub selected: usize,
    active_key: Option<QueryKey>,
    pub results: Option<QueryResults>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AutocompleteState {
    fn default() -> Self {
        Self {
            mode: AutocompleteMode::Suggestion,
            debounced: String::new(),
            pending: None,
            dismissed: false,
            selected: 0,
            active_key: None,
            results: None,
            loading: false,
            error: None,
        }
    }
}

impl AutocompleteState {
    /// Call after every edit of the input buffer.
    pub fn on_input_changed(&mut self, text: &str, cursor: usize, now: Instant) {
        self.mode = match detect_mention(text, cursor) {
            Some(token) => AutocompleteMode::Mention(token),
            None => AutocompleteMode::Suggestion,
        };
        self.pending = Some((text.to_owned(), now + DEBOUNCE));
        self.dismissed = false;
        self.selected = 0;
    }

    /// Promote pending input to `debounced` once its window has elapsed.
    /// Returns true when that happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some((_, due)) = &self.pending else {
            return false;
        };
        if *due > now {
            return false;
        }
        let Some((text, _)) = self.pending.take() else {
            return false;
        };
        if text != self.debounced {
            self.selected = 0;
        }
        self.debounced = text;
        true
    }

    pub fn is_mention(&self) -> bool {
        matches!(self.mode, AutocompleteMode::Mention(_))
    }

    /// Query the dropdown should show, if any. Mention mode wants the people
    /// lookup for a non-empty token; otherwise the debounced input drives word
    /// suggestions once it has non-blank content.
    pub fn query_key(&self) -> Option<QueryKey> {
        if self.dismissed {
            return None;
        }
        match &self.mode {
            AutocompleteMode::Mention(token) if !token.token.is_empty() => {
                Some(QueryKey::People(token.query().to_owned()))
            }
            AutocompleteMode::Mention(_) => None,
            AutocompleteMode::Suggestion if !self.debounced.trim().is_empty() => {
                Some(QueryKey::Suggestions(self.debounced.clone()))
            }
            AutocompleteMode::Suggestion => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.query_key().is_some()
    }

    pub fn active_key(&self) -> Option<&QueryKey> {
        self.active_key.as_ref()
    }

    /// Switch to `key`. Returns true when the caller must fetch it; false
    /// when `cached` already answers it.
    pub fn begin(&mut self, key: QueryKey, cached: Option<QueryResults>) -> bool {
        self.error = None;
        self.active_key = Some(key);
        self.loading = cached.is_none();
        self.results = cached;
        self.clamp_selection();
        self.loading
    }

    /// Apply a finished query. Results for a key that is no longer active are
    /// dropped; returns whether they were applied.
    pub fn apply(&mut self, key: &QueryKey, result: Result<QueryResults, QueryError>) -> bool {
        if self.active_key.as_ref() != Some(key) {
            tracing::debug!(query = key.text(), "dropping stale autocomplete results");
            return false;
        }
        self.loading = false;
        match result {
            Ok(results) => {
                self.results = Some(results);
                self.error = None;
            }
            Err(err) => {
                self.results = None;
                self.error = Some(err.to_string());
            }
        }
        self.clamp_selection();
        true
    }

    /// Forget the active query (nothing to show).
    pub fn clear_results(&mut self) {
        self.active_key = None;
        self.results = None;
        self.loading = false;
        self.error = None;
        self.selected = 0;
    }

    pub fn result_count(&self) -> usize {
        self.results.as_ref().map_or(0, QueryResults::len)
    }

    fn clamp_selection(&mut self) {
        let len = self.result_count();
        if self.selected >= len {
            self.selected = 0;
        }
    }

    pub fn move_down(&mut self) {
        let len = self.result_count().max(1);
        self.selected = (self.selected + 1) % len;
    }

    pub fn move_up(&mut self) {
        let len = self.result_count().max(1);
        self.selected = (self.selected + len - 1) % len;
    }

    /// Close the dropdown until the next edit.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
        self.clear_results();
    }

    /// Back to the initial state (after submitting).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rewrite `text` with the selected item. `None` when nothing is
    /// selectable.
    pub fn accept(&self, text: &str) -> Option<Completion> {
        let label = self.results.as_ref()?.label(self.selected)?;
        match (&self.mode, self.results.as_ref()?) {
            (AutocompleteMode::Mention(token), QueryResults::People(_)) => {
                let before: String = text.chars().take(token.start).collect();
                let after: String = text.chars().skip(token.end).collect();
                let replacement = format!("@{label}");
                let cursor = token.start + replacement.chars().count();
                Some(Completion { text: format!("{before}{replacement}{after}"), cursor })
            }
            (AutocompleteMode::Suggestion, QueryResults::Suggestions(_)) => {
                Some(Completion { text: label.to_owned(), cursor: label.chars().count() })
            }
            _ => None,
        }
    }
}
