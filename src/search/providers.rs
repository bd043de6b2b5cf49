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

//! In-process word and people providers with simulated network latency.

use crate::model::{Person, Suggestion, new_id};
use rand::Rng;
use std::time::Duration;

pub const WORDS: [&str; 14] = [
    "analyze logs",
    "generate report",
    "summarize article",
    "translate text",
    "draft email",
    "optimize query",
    "debug error",
    "create outline",
    "explain code",
    "write tests",
    "refactor module",
    "design api",
    "compare options",
    "brainstorm ideas",
];

pub const FIRST_NAMES: [&str; 10] =
    ["Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Jamie", "Cameron", "Avery", "Reese"];

pub const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Lee", "Patel", "Garcia", "Khan", "Nguyen", "Brown", "Davis", "Martinez",
];

pub const MAX_SUGGESTIONS: usize = 8;
pub const MAX_PEOPLE: usize = 10;

/// Inclusive range of simulated response delay, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Latency {
    pub const SUGGESTIONS: Self = Self { min_ms: 120, max_ms: 380 };
    pub const PEOPLE: Self = Self { min_ms: 100, max_ms: 260 };

    pub const fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    pub fn sample(self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::thread_rng().gen_range(self.min_ms..=self.max_ms))
    }

    async fn wait(self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Words containing `query` (trimmed, case-insensitive), capped at
/// [`MAX_SUGGESTIONS`].
pub fn match_suggestions(query: &str) -> Vec<Suggestion> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }
    WORDS
        .iter()
        .filter(|word| word.contains(&q))
        .take(MAX_SUGGESTIONS)
        .map(|word| Suggestion { id: new_id(), text: (*word).to_owned() })
        .collect()
}

/// Full first x last name pool, in row-major order.
pub fn people_pool() -> Vec<String> {
    FIRST_NAMES
        .iter()
        .flat_map(|first| LAST_NAMES.iter().map(move |last| format!("{first} {last}")))
        .collect()
}

/// Names containing `query` with any leading `@` removed. An `@`-only query
/// yields the head of the unfiltered pool.
pub fn match_people(query: &str) -> Vec<Person> {
    let q = query.trim_start_matches('@').trim().to_lowercase();
    people_pool()
        .into_iter()
        .filter(|name| q.is_empty() || name.to_lowercase().contains(&q))
        .take(MAX_PEOPLE)
        .map(|name| Person { id: new_id(), name })
        .collect()
}

/// Blank queries return immediately without waiting.
pub async fn search_suggestions(query: &str, latency: Latency) -> Vec<Suggestion> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    latency.wait().await;
    match_suggestions(query)
}

pub async fn search_people(query: &str, latency: Latency) -> Vec<Person> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    latency.wait().await;
    match_people(query)
}
