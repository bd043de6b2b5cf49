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

use crate::app::{App, Focus};
use crate::model::{Message, Role};
use crate::search::PROMPT_CATEGORIES;
use crate::ui::message;
use crate::ui::popup::truncate_to_width;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, Paragraph, Wrap};

/// Rows taken by the pinned first question: label line and separator.
const QUESTION_ROWS: u16 = 2;

/// Wrapped height of `lines` at `width`.
fn wrapped_height(lines: &[Line<'static>], width: u16) -> usize {
    Paragraph::new(Text::from(lines.to_vec())).wrap(Wrap { trim: false }).line_count(width)
}

#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let mut all_lines = Vec::new();
    let mut offsets = Vec::with_capacity(app.messages.len());
    let mut wrapped_so_far = 0usize;
    // Wrapped line where the first question ends.
    let mut first_question_end = None;
    let selected = (app.focus == Focus::Messages).then_some(app.selected_message);

    if app.messages.is_empty() {
        all_lines.extend(welcome_lines());
    }
    for (index, msg) in app.messages.iter().enumerate() {
        let mut lines = Vec::new();
        message::render_message(msg, app.spinner_frame, area.width, &mut lines);
        if selected == Some(index) {
            mark_selected(msg, &mut lines);
        }
        offsets.push((msg.id.clone(), wrapped_so_far));
        wrapped_so_far += wrapped_height(&lines, area.width);
        if msg.role == Role::User && first_question_end.is_none() {
            first_question_end = Some(wrapped_so_far);
        }
        all_lines.extend(lines);
    }
    app.viewport.message_offsets = offsets;

    // Build paragraph once; line_count gives the real wrapped height
    let paragraph = Paragraph::new(Text::from(all_lines)).wrap(Wrap { trim: false });
    let content_height = paragraph.line_count(area.width);
    let viewport_height = area.height as usize;

    if content_height <= viewport_height {
        // Short content: bottom-aligned so it stacks above the input
        let offset = (viewport_height - content_height) as u16;
        let render_area = Rect {
            x: area.x,
            y: area.y + offset,
            width: area.width,
            height: content_height as u16,
        };
        app.viewport.offset = 0;
        app.viewport.max_offset = 0;
        app.viewport.auto_scroll = true;
        frame.render_widget(paragraph, render_area);
    } else {
        // Long content: scroll within the full viewport
        let max_scroll = content_height - viewport_height;
        app.viewport.max_offset = max_scroll;
        if app.viewport.auto_scroll {
            app.viewport.offset = max_scroll;
        }
        app.viewport.offset = app.viewport.offset.min(max_scroll);
        if app.viewport.offset >= max_scroll {
            app.viewport.auto_scroll = true;
        }
        let scroll = app.viewport.offset.min(usize::from(u16::MAX)) as u16;
        frame.render_widget(paragraph.scroll((scroll, 0)), area);

        let scrolled_past = first_question_end.is_some_and(|end| app.viewport.offset >= end);
        if scrolled_past && app.messages.len() > 1 {
            render_pinned_question(frame, area, &app.messages);
        }
    }
}

/// Marker and available actions on the selected message's header line.
fn mark_selected(msg: &Message, lines: &mut [Line<'static>]) {
    let Some(header) = lines.first_mut() else {
        return;
    };
    let actions = match msg.role {
        Role::User => "c copy \u{00B7} e edit \u{00B7} s resubmit",
        Role::Assistant => "c copy \u{00B7} r regenerate",
    };
    let marker = Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD);
    header.spans.insert(0, Span::styled("\u{25B8} ", marker));
    header.spans.push(Span::styled(format!("  {actions}"), Style::default().fg(theme::DIM)));
}

/// Keep the conversation's first question visible once it scrolls away.
fn render_pinned_question(frame: &mut Frame, area: Rect, messages: &[Message]) {
    if area.height <= QUESTION_ROWS * 2 {
        return;
    }
    let Some(question) = messages.iter().find(|m| m.role == Role::User) else {
        return;
    };
    let label = "Question  ";
    let first_line = question.content.lines().next().unwrap_or_default();
    let width = usize::from(area.width).saturating_sub(label.len());
    let banner = Rect { height: QUESTION_ROWS, ..area };
    let lines = vec![
        Line::from(vec![
            Span::styled(label, Style::default().fg(theme::DIM)),
            Span::styled(
                truncate_to_width(first_line, width),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            theme::SEPARATOR_CHAR.repeat(usize::from(area.width)),
            Style::default().fg(theme::DIM),
        )),
    ];
    frame.render_widget(Clear, banner);
    frame.render_widget(Paragraph::new(lines), banner);
}

fn welcome_lines() -> Vec<Line<'static>> {
    let pad = "  ";
    let dim = Style::default().fg(theme::DIM);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{pad}artichat"),
            Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("{pad}How can I help you today?"), dim)),
        Line::default(),
        Line::from(Span::styled(
            format!("{pad}Tips: Enter to send, Shift+Enter for newline, @ to mention someone"),
            dim,
        )),
        Line::from(Span::styled(
            format!("{pad}      Ctrl+K commands, Ctrl+P prompt library, F1 all shortcuts"),
            dim,
        )),
        Line::default(),
    ];
    lines.push(Line::from(vec![
        Span::styled(format!("{pad}Prompt categories: "), dim),
        Span::raw(PROMPT_CATEGORIES.join(", ")),
    ]));
    lines.push(Line::default());
    lines
}
