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

use super::commands::Command;
use super::events::{input_edited, sync_query};
use super::overlay::{
    ArtifactViewerState, CommandMenuState, Overlay, PromptPickerState, SessionSearchState,
    TextPromptPurpose, TextPromptState,
};
use super::state::Focus;
use super::App;
use crate::markup::{Artifact, parse_blocks};
use crate::model::{Role, SearchResultKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

const PAGE_LINES: usize = 10;

fn is_ctrl_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

fn is_ctrl_char_shortcut(key: KeyEvent, expected: char) -> bool {
    is_ctrl_shortcut(key.modifiers)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

#[inline]
fn is_printable_text_modifiers(modifiers: KeyModifiers) -> bool {
    let ctrl_alt =
        modifiers.contains(KeyModifiers::CONTROL) && modifiers.contains(KeyModifiers::ALT);
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) || ctrl_alt
}

/// Typed character for overlay filters and prompts.
fn typed_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if is_printable_text_modifiers(key.modifiers) => Some(c),
        _ => None,
    }
}

pub(super) fn text_prompt_mut(app: &mut App) -> Option<&mut TextPromptState> {
    match app.overlay.as_mut() {
        Some(Overlay::TextPrompt(prompt)) => Some(prompt),
        _ => None,
    }
}

pub(super) fn dispatch_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char_shortcut(key, 'q') {
        app.should_quit = true;
        return;
    }
    if let Some(overlay) = app.overlay.take() {
        handle_overlay_key(app, overlay, key);
        return;
    }
    if handle_global_shortcuts(app, key) {
        return;
    }
    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::Sidebar => handle_sidebar_key(app, key),
        Focus::Messages => handle_message_key(app, key),
    }
}

/// Shortcuts that work from the input and the sidebar alike.
fn handle_global_shortcuts(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::F(1) {
        app.overlay = Some(Overlay::Help);
        return true;
    }
    if !is_ctrl_shortcut(key.modifiers) {
        return false;
    }
    let KeyCode::Char(c) = key.code else {
        return match key.code {
            KeyCode::Up => {
                app.viewport.scroll_up(1);
                true
            }
            KeyCode::Down => {
                app.viewport.scroll_down(1);
                true
            }
            _ => false,
        };
    };
    match c.to_ascii_lowercase() {
        'k' => app.overlay = Some(Overlay::CommandMenu(CommandMenuState::default())),
        'n' => {
            app.new_session();
            app.focus = Focus::Input;
        }
        // Legacy terminals report Ctrl+/ as Ctrl+7.
        '/' | '7' => app.focus = Focus::Input,
        'b' => toggle_sidebar(app),
        'p' => app.overlay = Some(Overlay::Prompts(PromptPickerState::default())),
        'f' => open_search(app),
        'r' => app.regenerate(),
        'e' => {
            app.start_edit();
            app.focus = Focus::Input;
        }
        'o' => open_artifacts(app),
        _ => return false,
    }
    true
}

fn toggle_sidebar(app: &mut App) {
    app.show_sidebar = !app.show_sidebar;
    if !app.show_sidebar {
        app.focus = Focus::Input;
    }
}

fn open_search(app: &mut App) {
    let mut search = SessionSearchState::default();
    search.refresh(&app.sessions, &app.messages);
    app.overlay = Some(Overlay::Search(search));
}

/// Artifacts of the newest message that has any.
fn open_artifacts(app: &mut App) {
    let artifacts = app
        .messages
        .iter()
        .rev()
        .filter(|m| m.role == Role::Assistant)
        .map(|m| Artifact::collect(&parse_blocks(&m.content)))
        .find(|artifacts| !artifacts.is_empty());
    match artifacts {
        Some(artifacts) => {
            app.overlay = Some(Overlay::Artifacts(ArtifactViewerState::new(artifacts)));
        }
        None => app.info("No artifacts in this chat"),
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
    if app.autocomplete.is_open() && handle_dropdown_key(app, key) {
        return;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Enter, m) if m.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            app.input.insert_newline();
            input_edited(app);
        }
        (KeyCode::Enter, _) => app.submit(),
        (KeyCode::Esc, _) => {
            if app.is_streaming() {
                app.cancel_reply();
            } else {
                app.cancel_edit();
            }
        }
        (KeyCode::Tab, _) if app.show_sidebar => app.focus = Focus::Sidebar,
        (KeyCode::BackTab, _) => select_messages(app),
        (KeyCode::Backspace, _) => {
            app.input.delete_char_before();
            input_edited(app);
        }
        (KeyCode::Delete, _) => {
            app.input.delete_char_after();
            input_edited(app);
        }
        (KeyCode::Left, _) => {
            app.input.move_left();
            input_edited(app);
        }
        (KeyCode::Right, _) => {
            app.input.move_right();
            input_edited(app);
        }
        (KeyCode::Home, _) => {
            app.input.move_home();
            input_edited(app);
        }
        (KeyCode::End, _) => {
            app.input.move_end();
            input_edited(app);
        }
        (KeyCode::Up, _) => {
            if app.input.cursor_row == 0 {
                app.viewport.scroll_up(1);
            } else {
                app.input.move_up();
            }
        }
        (KeyCode::Down, _) => {
            if app.input.cursor_row + 1 >= app.input.lines.len() {
                app.viewport.scroll_down(1);
            } else {
                app.input.move_down();
            }
        }
        (KeyCode::PageUp, _) => app.viewport.scroll_up(PAGE_LINES),
        (KeyCode::PageDown, _) => app.viewport.scroll_down(PAGE_LINES),
        (KeyCode::Char(c), m) if is_printable_text_modifiers(m) => {
            app.input.insert_char(c);
            input_edited(app);
        }
        _ => {}
    }
}

/// Keys consumed by the open dropdown. Enter and Tab never submit while it
/// is open, even with nothing to select.
fn handle_dropdown_key(app: &mut App, key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Down, _) => app.autocomplete.move_down(),
        (KeyCode::Up, _) => app.autocomplete.move_up(),
        (KeyCode::Esc, _) => app.autocomplete.dismiss(),
        (KeyCode::Enter | KeyCode::Tab, m)
            if !m.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
        {
            let Some(completion) = app.autocomplete.accept(&app.input.text()) else {
                return true;
            };
            app.input.set_text_and_cursor(&completion.text, completion.cursor);
            app.autocomplete.dismiss();
        }
        _ => return false,
    }
    true
}

/// Move focus onto the chat, starting from the newest message.
fn select_messages(app: &mut App) {
    let Some(last) = app.messages.len().checked_sub(1) else {
        app.info("No messages yet");
        return;
    };
    app.selected_message = last;
    app.focus = Focus::Messages;
    reveal_selected(app);
}

fn reveal_selected(app: &mut App) {
    if let Some(id) = app.messages.get(app.selected_message).map(|m| m.id.clone()) {
        app.viewport.reveal(&id);
    }
}

fn handle_message_key(app: &mut App, key: KeyEvent) {
    let index = app.selected_message;
    let Some(message) = app.messages.get(index) else {
        app.focus = Focus::Input;
        return;
    };
    let role = message.role;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected_message = index.saturating_sub(1);
            reveal_selected(app);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.selected_message = (index + 1).min(app.messages.len() - 1);
            reveal_selected(app);
        }
        KeyCode::Char('c') => {
            let text = message.content.clone();
            copy_to_clipboard(app, &text);
        }
        KeyCode::Char('r') if role == Role::Assistant => {
            app.regenerate_at(index);
            app.focus = Focus::Input;
        }
        KeyCode::Char('e') if role == Role::User => {
            app.edit_at(index);
            app.focus = Focus::Input;
        }
        KeyCode::Char('s') if role == Role::User => {
            app.resubmit_at(index);
            app.focus = Focus::Input;
        }
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => app.focus = Focus::Input,
        _ => {}
    }
}

fn handle_sidebar_key(app: &mut App, key: KeyEvent) {
    let Some(selected) = app.sessions.get(app.sidebar_selected).map(|s| s.id.clone()) else {
        match key.code {
            KeyCode::Char('n') => {
                app.new_session();
                app.focus = Focus::Input;
            }
            KeyCode::Esc | KeyCode::Tab => app.focus = Focus::Input,
            _ => {}
        }
        return;
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.sidebar_selected = app.sidebar_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.sidebar_selected = (app.sidebar_selected + 1).min(app.sessions.len() - 1);
        }
        KeyCode::Enter => {
            app.open_session(&selected);
            app.focus = Focus::Input;
        }
        KeyCode::Char('d') | KeyCode::Delete => app.delete_session(&selected),
        KeyCode::Char('r') => {
            let title = app.sessions[app.sidebar_selected].title.clone();
            app.overlay = Some(Overlay::TextPrompt(TextPromptState::rename(selected, &title)));
        }
        KeyCode::Char('n') => {
            app.new_session();
            app.focus = Focus::Input;
        }
        KeyCode::Esc | KeyCode::Tab => app.focus = Focus::Input,
        _ => {}
    }
}

/// `overlay` has been taken out of the app; put it back to keep it open.
fn handle_overlay_key(app: &mut App, overlay: Overlay, key: KeyEvent) {
    app.overlay = match overlay {
        Overlay::CommandMenu(menu) => command_menu_key(app, menu, key),
        Overlay::Prompts(picker) => prompt_picker_key(app, picker, key),
        Overlay::Search(search) => search_key(app, search, key),
        Overlay::Artifacts(viewer) => artifact_key(app, viewer, key),
        Overlay::Help => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) | KeyCode::Char('q') => None,
            _ => Some(Overlay::Help),
        },
        Overlay::TextPrompt(prompt) => text_prompt_key(app, prompt, key),
    };
}

fn command_menu_key(app: &mut App, mut menu: CommandMenuState, key: KeyEvent) -> Option<Overlay> {
    match key.code {
        KeyCode::Esc => return None,
        KeyCode::Down => menu.move_down(),
        KeyCode::Up => menu.move_up(),
        KeyCode::Enter => {
            let command = menu.selected_command()?;
            run_command(app, command);
            return app.overlay.take();
        }
        KeyCode::Backspace => {
            let mut query = std::mem::take(&mut menu.query);
            query.pop();
            menu.set_query(query);
        }
        _ => {
            if let Some(c) = typed_char(key) {
                let query = format!("{}{c}", menu.query);
                menu.set_query(query);
            }
        }
    }
    Some(Overlay::CommandMenu(menu))
}

/// Commands may open another overlay; the caller picks it up from the app.
fn run_command(app: &mut App, command: Command) {
    tracing::debug!(command = command.label(), "running command");
    match command {
        Command::NewChat => {
            app.new_session();
            app.focus = Focus::Input;
        }
        Command::RenameChat => {
            if let Some(summary) = app.current_summary() {
                let prompt = TextPromptState::rename(summary.id.clone(), &summary.title);
                app.overlay = Some(Overlay::TextPrompt(prompt));
            }
        }
        Command::SearchChats => open_search(app),
        Command::PromptLibrary => {
            app.overlay = Some(Overlay::Prompts(PromptPickerState::default()));
        }
        Command::ExportHistory => {
            let prompt =
                TextPromptState::path(TextPromptPurpose::ExportTo, &app.options.transfer_path);
            app.overlay = Some(Overlay::TextPrompt(prompt));
        }
        Command::ImportHistory => {
            let prompt =
                TextPromptState::path(TextPromptPurpose::ImportFrom, &app.options.transfer_path);
            app.overlay = Some(Overlay::TextPrompt(prompt));
        }
        Command::ClearHistory => app.clear_history(),
        Command::ToggleSidebar => toggle_sidebar(app),
        Command::Shortcuts => app.overlay = Some(Overlay::Help),
    }
}

fn prompt_picker_key(
    app: &mut App,
    mut picker: PromptPickerState,
    key: KeyEvent,
) -> Option<Overlay> {
    match key.code {
        KeyCode::Esc => return None,
        KeyCode::Down => picker.move_down(),
        KeyCode::Up => picker.move_up(),
        KeyCode::Enter => {
            let prompt = picker.selected_prompt()?;
            app.apply_prompt(prompt);
            app.focus = Focus::Input;
            return None;
        }
        KeyCode::Backspace => {
            let mut query = std::mem::take(&mut picker.query);
            query.pop();
            picker.set_query(query);
        }
        _ => {
            if let Some(c) = typed_char(key) {
                let query = format!("{}{c}", picker.query);
                picker.set_query(query);
            }
        }
    }
    Some(Overlay::Prompts(picker))
}

fn search_key(app: &mut App, mut search: SessionSearchState, key: KeyEvent) -> Option<Overlay> {
    match key.code {
        KeyCode::Esc => return None,
        KeyCode::Down => search.move_down(),
        KeyCode::Up => search.move_up(),
        KeyCode::Enter => {
            let result = search.selected_result()?.clone();
            match result.kind {
                SearchResultKind::Session => app.open_session(&result.id),
                SearchResultKind::Message => app.viewport.reveal(&result.id),
            }
            app.focus = Focus::Input;
            return None;
        }
        KeyCode::Backspace => {
            search.query.pop();
            search.selected = 0;
            search.refresh(&app.sessions, &app.messages);
        }
        _ => {
            if let Some(c) = typed_char(key) {
                search.query.push(c);
                search.selected = 0;
                search.refresh(&app.sessions, &app.messages);
            }
        }
    }
    Some(Overlay::Search(search))
}

fn artifact_key(app: &mut App, mut viewer: ArtifactViewerState, key: KeyEvent) -> Option<Overlay> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return None,
        KeyCode::Right | KeyCode::Char('l') => viewer.next(),
        KeyCode::Left | KeyCode::Char('h') => viewer.prev(),
        KeyCode::Down | KeyCode::Char('j') => viewer.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => viewer.scroll_up(),
        KeyCode::Enter | KeyCode::Char('e') => viewer.toggle_expanded(),
        KeyCode::Char('c') => {
            if let Some(artifact) = viewer.current() {
                copy_to_clipboard(app, artifact.copy_text());
            }
        }
        _ => {}
    }
    Some(Overlay::Artifacts(viewer))
}

fn copy_to_clipboard(app: &mut App, text: &str) {
    let copied = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match copied {
        Ok(()) => app.info("Copied to clipboard"),
        Err(err) => {
            tracing::warn!("clipboard unavailable: {err}");
            app.error(format!("Copy failed: {err}"));
        }
    }
}

fn text_prompt_key(app: &mut App, mut prompt: TextPromptState, key: KeyEvent) -> Option<Overlay> {
    match key.code {
        KeyCode::Esc => return None,
        KeyCode::Enter => {
            let value = prompt.value.trim().to_owned();
            match prompt.purpose {
                TextPromptPurpose::RenameSession(id) => app.rename_session(&id, &value),
                TextPromptPurpose::ExportTo if !value.is_empty() => {
                    app.export_to(&PathBuf::from(value));
                }
                TextPromptPurpose::ImportFrom if !value.is_empty() => {
                    app.import_from(&PathBuf::from(value));
                    sync_query(app);
                }
                TextPromptPurpose::ExportTo | TextPromptPurpose::ImportFrom => {}
            }
            return None;
        }
        KeyCode::Backspace => {
            prompt.value.pop();
        }
        _ => {
            if let Some(c) = typed_char(key) {
                prompt.value.push(c);
            }
        }
    }
    Some(Overlay::TextPrompt(prompt))
}
