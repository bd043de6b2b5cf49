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

//! Persistence: the key-value port, the chat session store built on it, and
//! session title generation.

pub mod history;
pub mod kv;
pub mod title;

pub use history::{ChatStore, DEFAULT_TITLE};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use title::generate_session_title;
