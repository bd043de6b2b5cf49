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

//! Modal overlays drawn above the chat: command menu, prompt picker, chat
//! search, artifact viewer, shortcut help and single-line text prompts.

use super::commands::{Command, filter_commands};
use crate::markup::Artifact;
use crate::model::{Message, Prompt, SearchResult, SessionSummary};
use crate::search::prompts::{browse_prompts, search_prompts};
use crate::search::{combine_search_results, search_messages, search_sessions};
use std::path::Path;

pub enum Overlay {
    CommandMenu(CommandMenuState),
    Prompts(PromptPickerState),
    Search(SessionSearchState),
    Artifacts(ArtifactViewerState),
    Help,
    TextPrompt(TextPromptState),
}

fn wrap_next(selected: usize, len: usize) -> usize {
    (selected + 1) % len.max(1)
}

fn wrap_prev(selected: usize, len: usize) -> usize {
    let len = len.max(1);
    (selected + len - 1) % len
}

#[derive(Debug, Default)]
pub struct CommandMenuState {
    pub query: String,
    pub selected: usize,
}

impl CommandMenuState {
    pub fn commands(&self) -> Vec<Command> {
        filter_commands(&self.query)
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.selected = 0;
    }

    pub fn move_down(&mut self) {
        self.selected = wrap_next(self.selected, self.commands().len());
    }

    pub fn move_up(&mut self) {
        self.selected = wrap_prev(self.selected, self.commands().len());
    }

    pub fn selected_command(&self) -> Option<Command> {
        self.commands().get(self.selected).copied()
    }
}

/// Row of the prompt picker list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRow {
    Category(&'static str),
    Prompt(&'static Prompt),
}

#[derive(Debug, Default)]
pub struct PromptPickerState {
    pub query: String,
    /// Index into the selectable prompts (headers are skipped).
    pub selected: usize,
}

impl PromptPickerState {
    /// Category sections when the query is blank, flat matches otherwise.
    pub fn rows(&self) -> Vec<PromptRow> {
        if self.query.trim().is_empty() {
            browse_prompts()
                .into_iter()
                .flat_map(|(category, prompts)| {
                    std::iter::once(PromptRow::Category(category))
                        .chain(prompts.into_iter().map(PromptRow::Prompt))
                })
                .collect()
        } else {
            search_prompts(&self.query).into_iter().map(PromptRow::Prompt).collect()
        }
    }

    pub fn prompts(&self) -> Vec<&'static Prompt> {
        self.rows()
            .into_iter()
            .filter_map(|row| match row {
                PromptRow::Prompt(p) => Some(p),
                PromptRow::Category(_) => None,
            })
            .collect()
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.selected = 0;
    }

    pub fn move_down(&mut self) {
        self.selected = wrap_next(self.selected, self.prompts().len());
    }

    pub fn move_up(&mut self) {
        self.selected = wrap_prev(self.selected, self.prompts().len());
    }

    pub fn selected_prompt(&self) -> Option<&'static Prompt> {
        self.prompts().get(self.selected).copied()
    }
}

#[derive(Debug, Default)]
pub struct SessionSearchState {
    pub query: String,
    pub selected: usize,
    pub results: Vec<SearchResult>,
}

impl SessionSearchState {
    /// Titles of every session plus the bodies of the open session's messages.
    pub fn refresh(&mut self, sessions: &[SessionSummary], messages: &[Message]) {
        let session_hits = search_sessions(&self.query, sessions);
        let message_hits = search_messages(&self.query, messages);
        self.results = combine_search_results(message_hits, session_hits);
        if self.selected >= self.results.len() {
            self.selected = 0;
        }
    }

    pub fn move_down(&mut self) {
        self.selected = wrap_next(self.selected, self.results.len());
    }

    pub fn move_up(&mut self) {
        self.selected = wrap_prev(self.selected, self.results.len());
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }
}

#[derive(Debug)]
pub struct ArtifactViewerState {
    pub artifacts: Vec<Artifact>,
    pub index: usize,
    pub expanded: bool,
    pub scroll: usize,
}

impl ArtifactViewerState {
    pub fn new(artifacts: Vec<Artifact>) -> Self {
        Self { artifacts, index: 0, expanded: false, scroll: 0 }
    }

    pub fn current(&self) -> Option<&Artifact> {
        self.artifacts.get(self.index)
    }

    pub fn next(&mut self) {
        self.index = wrap_next(self.index, self.artifacts.len());
        self.scroll = 0;
    }

    pub fn prev(&mut self) {
        self.index = wrap_prev(self.index, self.artifacts.len());
        self.scroll = 0;
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        let max = self.current().map_or(0, |a| a.line_count().saturating_sub(1));
        self.scroll = (self.scroll + 1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPromptPurpose {
    RenameSession(String),
    ExportTo,
    ImportFrom,
}

#[derive(Debug)]
pub struct TextPromptState {
    pub purpose: TextPromptPurpose,
    pub value: String,
}

impl TextPromptState {
    pub fn rename(session_id: String, current_title: &str) -> Self {
        Self {
            purpose: TextPromptPurpose::RenameSession(session_id),
            value: current_title.to_owned(),
        }
    }

    pub fn path(purpose: TextPromptPurpose, default: &Path) -> Self {
        Self { purpose, value: default.display().to_string() }
    }

    pub fn title(&self) -> &'static str {
        match self.purpose {
            TextPromptPurpose::RenameSession(_) => "Rename chat",
            TextPromptPurpose::ExportTo => "Export history to",
            TextPromptPurpose::ImportFrom => "Import history from",
        }
    }
}
