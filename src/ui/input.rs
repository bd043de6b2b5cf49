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

use crate::app::App;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

/// Horizontal padding to match header/footer inset.
pub const INPUT_PAD: u16 = 2;

/// Prompt prefix width: "❯ " = 2 columns
pub const PROMPT_WIDTH: u16 = 2;

/// Maximum input area height (lines) to prevent the input from consuming the entire screen.
const MAX_INPUT_HEIGHT: u16 = 12;

const PLACEHOLDER: &str = "Type a message... (@ to mention, Ctrl+K for commands)";

fn prompt_span(app: &App) -> Span<'static> {
    let color = if app.editing.is_some() { theme::NOTICE_INFO } else { theme::RUST_ORANGE };
    Span::styled(format!("{} ", theme::PROMPT_CHAR), Style::default().fg(color))
}

pub fn render(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let padded = Rect {
        x: area.x + INPUT_PAD,
        y: area.y,
        width: area.width.saturating_sub(INPUT_PAD * 2),
        height: area.height,
    };

    if app.input.is_empty() {
        let line = Line::from(vec![
            prompt_span(app),
            Span::styled(PLACEHOLDER, Style::default().fg(theme::DIM)),
        ]);
        frame.render_widget(Paragraph::new(line), padded);
        if focused {
            frame.set_cursor_position((padded.x + PROMPT_WIDTH, padded.y));
        }
        return;
    }

    // Prompt on the first line, continuation lines indented to match
    let lines: Vec<Line> = app
        .input
        .lines
        .iter()
        .enumerate()
        .map(|(row, text)| {
            let prefix = if row == 0 { prompt_span(app) } else { Span::raw("  ") };
            Line::from(vec![prefix, Span::raw(text.clone())])
        })
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, padded);

    if !focused {
        return;
    }
    let content_width = padded.width.saturating_sub(PROMPT_WIDTH) as usize;
    if let Some((col, row)) = cursor_position(app, content_width) {
        let cursor_x = padded.x + PROMPT_WIDTH + col;
        let cursor_y = padded.y + row;
        if cursor_x < padded.right() && cursor_y < padded.bottom() {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

/// Visual `(col, row)` of the cursor within the wrapped content area.
#[allow(clippy::cast_possible_truncation)]
fn cursor_position(app: &App, content_width: usize) -> Option<(u16, u16)> {
    if content_width == 0 {
        return None;
    }
    let mut visual_row: u16 = 0;
    for (row, line) in app.input.lines.iter().enumerate() {
        if row == app.input.cursor_row {
            let col = app.input.cursor_col;
            let wrap_row = (col / content_width) as u16;
            let wrap_col = (col % content_width) as u16;
            return Some((wrap_col, visual_row + wrap_row));
        }
        visual_row += wrapped_rows(line.chars().count(), content_width);
    }
    None
}

/// Each logical line takes ceil(chars / width) visual lines, at least 1; a
/// line that exactly fills the width gets an extra row for the cursor.
#[allow(clippy::cast_possible_truncation)]
fn wrapped_rows(chars: usize, content_width: usize) -> u16 {
    ((chars + content_width) / content_width).max(1) as u16
}

/// Number of visual lines the input occupies, accounting for wrapping.
/// Used by the layout to allocate the input area height.
pub fn visual_line_count(app: &App, area_width: u16) -> u16 {
    if app.input.is_empty() {
        return 1;
    }
    let content_width = area_width
        .saturating_sub(INPUT_PAD * 2)
        .saturating_sub(PROMPT_WIDTH) as usize;
    if content_width == 0 {
        return app.input.line_count();
    }

    let total = app.input.lines.iter().fold(0u16, |acc, line| {
        acc.saturating_add(wrapped_rows(line.chars().count(), content_width))
    });
    total.min(MAX_INPUT_HEIGHT)
}
