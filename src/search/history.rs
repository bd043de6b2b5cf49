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

//! Substring search over saved sessions and messages. Pure, no I/O.

use crate::model::{Message, Role, SearchResult, SearchResultKind, SessionSummary};

pub const PREVIEW_CHARS: usize = 100;

pub fn search_messages(query: &str, messages: &[Message]) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let q = query.to_lowercase();
    messages
        .iter()
        .filter(|msg| msg.content.to_lowercase().contains(&q))
        .map(|msg| SearchResult {
            kind: SearchResultKind::Message,
            id: msg.id.clone(),
            title: match msg.role {
                Role::User => "Your message",
                Role::Assistant => "Assistant response",
            }
            .to_owned(),
            preview: msg.content.chars().take(PREVIEW_CHARS).collect(),
            timestamp: msg.timestamp,
        })
        .collect()
}

pub fn search_sessions(query: &str, sessions: &[SessionSummary]) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let q = query.to_lowercase();
    sessions
        .iter()
        .filter(|session| session.title.to_lowercase().contains(&q))
        .map(|session| SearchResult {
            kind: SearchResultKind::Session,
            id: session.id.clone(),
            title: session.title.clone(),
            preview: session.title.clone(),
            timestamp: session.timestamp,
        })
        .collect()
}

/// Session hits first, then message hits, stably sorted newest first.
pub fn combine_search_results(
    messages: Vec<SearchResult>,
    sessions: Vec<SearchResult>,
) -> Vec<SearchResult> {
    let mut combined = sessions;
    combined.extend(messages);
    combined.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    combined
}
