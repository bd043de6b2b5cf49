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

//! HTTP front for the two autocomplete queries.
//!
//! `GET /people?q=` and `GET /search?q=` answer `{"results": [...]}`; a blank
//! `q` short-circuits to an empty list without touching the source.

use crate::model::{Person, Suggestion};
use crate::search::source::{QueryError, QuerySource, ResultsBody};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
pub struct ServerState {
    pub source: Arc<dyn QuerySource>,
}

impl ServerState {
    pub fn new(source: Arc<dyn QuerySource>) -> Self {
        Self { source }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("upstream query failed: {0}")]
    Upstream(#[from] QueryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self {
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        tracing::warn!("query request failed: {self}");
        (code, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
struct QueryParams {
    #[serde(default)]
    q: String,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/people", get(people))
        .route("/search", get(search))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn people(
    State(st): State<ServerState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<ResultsBody<Person>>, ApiError> {
    let q = params.q.trim();
    let results = if q.is_empty() { Vec::new() } else { st.source.people(q).await? };
    Ok(Json(ResultsBody { results }))
}

async fn search(
    State(st): State<ServerState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<ResultsBody<Suggestion>>, ApiError> {
    let q = params.q.trim();
    let results = if q.is_empty() { Vec::new() } else { st.source.suggestions(q).await? };
    Ok(Json(ResultsBody { results }))
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(addr: SocketAddr, state: ServerState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("query server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down query server");
        })
        .await
}
