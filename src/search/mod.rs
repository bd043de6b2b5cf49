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

//! Suggestion providers, the query context the UI talks to, the prompt
//! catalog, and chat history search.

pub mod context;
pub mod history;
pub mod prompts;
pub mod providers;
pub mod source;

pub use context::{QueryContext, QueryKey, QueryResults};
pub use history::{combine_search_results, search_messages, search_sessions};
pub use prompts::{PROMPT_CATEGORIES, PROMPT_LIBRARY, search_prompts};
pub use providers::Latency;
pub use source::{HttpSource, LocalSource, QueryError, QuerySource};
