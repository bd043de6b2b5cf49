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

//! Where autocomplete queries are answered: in-process providers or a running
//! query server.

use super::providers::{self, Latency};
use crate::model::{Person, Suggestion};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("query request failed: {0}")]
    Transport(String),
    #[error("query server returned HTTP {0}")]
    Status(u16),
    #[error("malformed query response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Body shape shared by `/people` and `/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsBody<T> {
    pub results: Vec<T>,
}

#[async_trait]
pub trait QuerySource: Send + Sync {
    async fn people(&self, query: &str) -> Result<Vec<Person>, QueryError>;
    async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>, QueryError>;
}

/// Answers queries from the built-in word list and name pool.
#[derive(Debug, Clone, Copy)]
pub struct LocalSource {
    pub people_latency: Latency,
    pub suggestion_latency: Latency,
}

impl LocalSource {
    /// Zero-latency source, for tests and the HTTP server's own tests.
    pub const fn instant() -> Self {
        Self { people_latency: Latency::none(), suggestion_latency: Latency::none() }
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self { people_latency: Latency::PEOPLE, suggestion_latency: Latency::SUGGESTIONS }
    }
}

#[async_trait]
impl QuerySource for LocalSource {
    async fn people(&self, query: &str) -> Result<Vec<Person>, QueryError> {
        Ok(providers::search_people(query, self.people_latency).await)
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>, QueryError> {
        Ok(providers::search_suggestions(query, self.suggestion_latency).await)
    }
}

/// Queries a remote server exposing `GET /people` and `GET /search`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T>(&self, path: &str, query: &str) -> Result<Vec<T>, QueryError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, query, "dispatching remote query");
        let response = self.client.get(&url).query(&[("q", query)]).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status(status.as_u16()));
        }
        let body: ResultsBody<T> = response.json().await?;
        Ok(body.results)
    }
}

#[async_trait]
impl QuerySource for HttpSource {
    async fn people(&self, query: &str) -> Result<Vec<Person>, QueryError> {
        self.get("/people", query).await
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>, QueryError> {
        self.get("/search", query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn local_source_answers_both_kinds() {
        let source = LocalSource::instant();
        let people = source.people("@lee").await.unwrap();
        assert_eq!(people.len(), 10);
        let words = source.suggestions("tests").await.unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "write tests");
    }

    #[test]
    fn http_source_normalizes_trailing_slash() {
        let source = HttpSource::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(source.base_url(), "http://127.0.0.1:3000");
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Port 9 (discard) on loopback is essentially never listening.
        let source = HttpSource::new("http://127.0.0.1:9").unwrap();
        let err = source.people("al").await.unwrap_err();
        assert!(matches!(err, QueryError::Transport(_)), "{err:?}");
    }
}
