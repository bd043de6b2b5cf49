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

//! Shared chrome for the modal overlays.

use crate::ui::layout::centered;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Clear a centered `width` x `height` box, draw its border and return the
/// inner area.
pub fn open(frame: &mut Frame, area: Rect, width: u16, height: u16, title: &str) -> Rect {
    let outer = centered(area, width, height);
    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::DIM));
    let inner = block.inner(outer);
    frame.render_widget(Clear, outer);
    frame.render_widget(block, outer);
    inner
}

/// The filter input row at the top of a list overlay.
pub fn filter_line(query: &str, placeholder: &str) -> Line<'static> {
    let prompt =
        Span::styled(format!("{} ", theme::PROMPT_CHAR), Style::default().fg(theme::RUST_ORANGE));
    if query.is_empty() {
        Line::from(vec![prompt, dim(placeholder)])
    } else {
        Line::from(vec![prompt, Span::raw(query.to_owned())])
    }
}

/// Prefix a list row with the selection marker (or matching indent).
pub fn list_row(selected: bool, mut spans: Vec<Span<'static>>) -> Line<'static> {
    let marker = if selected {
        Span::styled(
            theme::SELECT_MARKER,
            Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw("   ")
    };
    spans.insert(0, marker);
    let line = Line::from(spans);
    if selected { line.style(Style::default().add_modifier(Modifier::BOLD)) } else { line }
}

/// First row of a `visible`-row window that keeps `selected` in view.
pub fn window_start(selected: usize, visible: usize) -> usize {
    (selected + 1).saturating_sub(visible.max(1))
}

pub fn dim(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(theme::DIM))
}

pub fn truncate_to_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(text) <= width {
        return text.to_owned();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
