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

pub mod app;
pub mod error;
pub mod markup;
pub mod model;
pub mod reply;
pub mod search;
pub mod server;
pub mod store;
pub mod ui;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "artichat", about = "Terminal chat with inline artifacts and @-mentions")]
pub struct Cli {
    /// Directory for chat history (defaults to the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep history in memory only; nothing is written to disk
    #[arg(long, conflicts_with = "data_dir")]
    pub memory: bool,

    /// Answer autocomplete queries from a running query server
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Run the query server instead of the TUI
    #[arg(long, value_name = "ADDR", conflicts_with = "endpoint")]
    pub serve: Option<SocketAddr>,

    /// Write all chats to a JSON file and exit
    #[arg(long, value_name = "PATH", conflicts_with_all = ["serve", "import"])]
    pub export: Option<PathBuf>,

    /// Replace chat history with a JSON export and exit
    #[arg(long, value_name = "PATH", conflicts_with = "serve")]
    pub import: Option<PathBuf>,

    /// Write tracing diagnostics to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives (falls back to `RUST_LOG`, then `info`)
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}

impl Cli {
    /// `--data-dir`, else `<platform data dir>/artichat`.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(|| dirs::data_dir().map(|dir| dir.join("artichat")))
    }
}
