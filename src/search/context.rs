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

//! Query context: the query source plus a per-key result cache. Built once at
//! startup, shared by the UI and its background query tasks, cleared on
//! shutdown.

use super::source::{QueryError, QuerySource};
use crate::model::{Person, Suggestion};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Cached results stay fresh for this long.
pub const STALE_AFTER: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `@`-stripped mention token.
    People(String),
    /// Debounced input text.
    Suggestions(String),
}

impl QueryKey {
    pub fn text(&self) -> &str {
        match self {
            Self::People(q) | Self::Suggestions(q) => q,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResults {
    People(Vec<Person>),
    Suggestions(Vec<Suggestion>),
}

impl QueryResults {
    pub fn len(&self) -> usize {
        match self {
            Self::People(items) => items.len(),
            Self::Suggestions(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display label of the item at `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        match self {
            Self::People(items) => items.get(index).map(|p| p.name.as_str()),
            Self::Suggestions(items) => items.get(index).map(|s| s.text.as_str()),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        (0..self.len()).filter_map(|i| self.label(i)).collect()
    }
}

struct CacheEntry {
    fetched_at: Instant,
    results: QueryResults,
}

pub struct QueryContext {
    source: Arc<dyn QuerySource>,
    cache: Mutex<HashMap<QueryKey, CacheEntry>>,
    stale_after: Duration,
}

impl QueryContext {
    pub fn new(source: Arc<dyn QuerySource>) -> Self {
        Self::with_staleness(source, STALE_AFTER)
    }

    pub fn with_staleness(source: Arc<dyn QuerySource>, stale_after: Duration) -> Self {
        Self { source, cache: Mutex::new(HashMap::new()), stale_after }
    }

    pub fn source(&self) -> Arc<dyn QuerySource> {
        Arc::clone(&self.source)
    }

    /// Fresh cached results for `key`, if any.
    pub fn cached(&self, key: &QueryKey) -> Option<QueryResults> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.stale_after)
            .map(|entry| entry.results.clone())
    }

    /// Cached results when fresh, otherwise ask the source and remember the
    /// answer. Failures are not cached.
    pub async fn fetch(&self, key: &QueryKey) -> Result<QueryResults, QueryError> {
        if let Some(results) = self.cached(key) {
            return Ok(results);
        }
        let results = match key {
            QueryKey::People(q) => QueryResults::People(self.source.people(q).await?),
            QueryKey::Suggestions(q) => {
                QueryResults::Suggestions(self.source.suggestions(q).await?)
            }
        };
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = CacheEntry { fetched_at: Instant::now(), results: results.clone() };
        cache.insert(key.clone(), entry);
        Ok(results)
    }

    pub fn clear(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(entries = cache.len(), "clearing query cache");
        cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl QuerySource for Counting {
        async fn people(&self, query: &str) -> Result<Vec<Person>, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(QueryError::Status(500));
            }
            Ok(vec![Person { id: "1".to_owned(), name: format!("{query} person") }])
        }

        async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Suggestion { id: "1".to_owned(), text: query.to_owned() }])
        }
    }

    #[tokio::test]
    async fn repeated_key_is_served_from_cache() {
        let source = Arc::new(Counting::default());
        let ctx = QueryContext::new(source.clone());
        let key = QueryKey::People("al".to_owned());
        let first = ctx.fetch(&key).await.unwrap();
        let second = ctx.fetch(&key).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.label(0), Some("al person"));
    }

    #[tokio::test]
    async fn keys_are_exact() {
        let source = Arc::new(Counting::default());
        let ctx = QueryContext::new(source.clone());
        ctx.fetch(&QueryKey::Suggestions("a".to_owned())).await.unwrap();
        ctx.fetch(&QueryKey::People("a".to_owned())).await.unwrap();
        ctx.fetch(&QueryKey::Suggestions("a ".to_owned())).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stale_entries_are_refetched() {
        let source = Arc::new(Counting::default());
        let ctx = QueryContext::with_staleness(source.clone(), Duration::ZERO);
        let key = QueryKey::Suggestions("x".to_owned());
        ctx.fetch(&key).await.unwrap();
        assert!(ctx.cached(&key).is_none());
        ctx.fetch(&key).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_propagate_and_are_not_cached() {
        let source = Arc::new(Counting { fail: true, ..Counting::default() });
        let ctx = QueryContext::new(source.clone());
        let key = QueryKey::People("x".to_owned());
        assert_eq!(ctx.fetch(&key).await, Err(QueryError::Status(500)));
        assert!(ctx.cached(&key).is_none());
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let ctx = QueryContext::new(Arc::new(Counting::default()));
        let key = QueryKey::Suggestions("x".to_owned());
        ctx.fetch(&key).await.unwrap();
        assert!(ctx.cached(&key).is_some());
        ctx.clear();
        assert!(ctx.cached(&key).is_none());
    }
}
