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

//! Command menu entries and the keyboard shortcut table.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewChat,
    RenameChat,
    SearchChats,
    PromptLibrary,
    ExportHistory,
    ImportHistory,
    ClearHistory,
    ToggleSidebar,
    Shortcuts,
}

pub const COMMANDS: [Command; 9] = [
    Command::NewChat,
    Command::RenameChat,
    Command::SearchChats,
    Command::PromptLibrary,
    Command::ExportHistory,
    Command::ImportHistory,
    Command::ClearHistory,
    Command::ToggleSidebar,
    Command::Shortcuts,
];

impl Command {
    pub fn label(self) -> &'static str {
        match self {
            Self::NewChat => "Start a New Chat",
            Self::RenameChat => "Rename Chat",
            Self::SearchChats => "Search Chats",
            Self::PromptLibrary => "Browse Prompt Library",
            Self::ExportHistory => "Export History",
            Self::ImportHistory => "Import History",
            Self::ClearHistory => "Clear History",
            Self::ToggleSidebar => "Toggle Sidebar",
            Self::Shortcuts => "Keyboard Shortcuts",
        }
    }

    pub fn group(self) -> &'static str {
        match self {
            Self::NewChat | Self::RenameChat | Self::SearchChats | Self::PromptLibrary => "General",
            Self::ExportHistory | Self::ImportHistory | Self::ClearHistory => "History",
            Self::ToggleSidebar | Self::Shortcuts => "View",
        }
    }

    pub fn shortcut(self) -> Option<&'static str> {
        match self {
            Self::NewChat => Some("Ctrl+N"),
            Self::SearchChats => Some("Ctrl+F"),
            Self::PromptLibrary => Some("Ctrl+P"),
            Self::ToggleSidebar => Some("Ctrl+B"),
            Self::Shortcuts => Some("F1"),
            _ => None,
        }
    }
}

/// Commands whose label or group contains `query` (case-insensitive), in
/// menu order. A blank query lists everything.
pub fn filter_commands(query: &str) -> Vec<Command> {
    let q = query.trim().to_lowercase();
    COMMANDS
        .into_iter()
        .filter(|c| {
            q.is_empty()
                || c.label().to_lowercase().contains(&q)
                || c.group().to_lowercase().contains(&q)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub name: &'static str,
    pub description: &'static str,
    pub keys: &'static str,
}

pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut { name: "Command Menu", description: "Open the command menu", keys: "Ctrl+K" },
    Shortcut { name: "New Chat", description: "Start a new conversation", keys: "Ctrl+N" },
    Shortcut { name: "Focus Input", description: "Focus on the chat input", keys: "Ctrl+/" },
    Shortcut { name: "Toggle Sidebar", description: "Show or hide the sidebar", keys: "Ctrl+B" },
    Shortcut { name: "Send Message", description: "Send your message", keys: "Enter" },
    Shortcut {
        name: "New Line",
        description: "Add a new line in message",
        keys: "Shift+Enter / Alt+Enter",
    },
    Shortcut { name: "Prompt Library", description: "Insert a prompt template", keys: "Ctrl+P" },
    Shortcut { name: "Search Chats", description: "Search titles and messages", keys: "Ctrl+F" },
    Shortcut { name: "Regenerate", description: "Regenerate the last reply", keys: "Ctrl+R" },
    Shortcut { name: "Edit", description: "Edit your last message", keys: "Ctrl+E" },
    Shortcut { name: "Artifacts", description: "Open artifacts of the last reply", keys: "Ctrl+O" },
    Shortcut { name: "Sidebar Focus", description: "Move focus to the chat list", keys: "Tab" },
    Shortcut {
        name: "Select Message",
        description: "Copy, edit, resubmit or regenerate a message",
        keys: "Shift+Tab",
    },
    Shortcut { name: "Stop", description: "Stop the streaming reply", keys: "Esc" },
    Shortcut { name: "Shortcuts", description: "Show this table", keys: "F1" },
    Shortcut { name: "Quit", description: "Exit the application", keys: "Ctrl+Q" },
];
