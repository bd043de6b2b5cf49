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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("data directory unavailable")]
    StorageUnavailable,
    #[error("history import rejected")]
    ImportRejected,
    #[error("history export failed")]
    ExportFailed,
    #[error("query server could not bind")]
    ServerBind,
    #[error("invalid query endpoint")]
    InvalidEndpoint,
    #[error("terminal could not be initialized")]
    TerminalInit,
}

impl AppError {
    pub const STORAGE_UNAVAILABLE_EXIT_CODE: i32 = 20;
    pub const IMPORT_REJECTED_EXIT_CODE: i32 = 21;
    pub const EXPORT_FAILED_EXIT_CODE: i32 = 22;
    pub const SERVER_BIND_EXIT_CODE: i32 = 23;
    pub const INVALID_ENDPOINT_EXIT_CODE: i32 = 24;
    pub const TERMINAL_INIT_EXIT_CODE: i32 = 25;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StorageUnavailable => Self::STORAGE_UNAVAILABLE_EXIT_CODE,
            Self::ImportRejected => Self::IMPORT_REJECTED_EXIT_CODE,
            Self::ExportFailed => Self::EXPORT_FAILED_EXIT_CODE,
            Self::ServerBind => Self::SERVER_BIND_EXIT_CODE,
            Self::InvalidEndpoint => Self::INVALID_ENDPOINT_EXIT_CODE,
            Self::TerminalInit => Self::TERMINAL_INIT_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::StorageUnavailable => {
                "Could not open the data directory. Pass --data-dir <PATH> or use --memory."
            }
            Self::ImportRejected => {
                "The file is not a chat history export (expected a JSON array)."
            }
            Self::ExportFailed => "Could not write the history export file.",
            Self::ServerBind => "Could not bind the query server address. Is it already in use?",
            Self::InvalidEndpoint => "The --endpoint value is not a usable http(s) URL.",
            Self::TerminalInit => "Could not initialize the terminal. Is this an interactive TTY?",
        }
    }
}
