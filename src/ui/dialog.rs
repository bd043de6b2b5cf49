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

use crate::app::overlay::TextPromptState;
use crate::ui::popup;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const WIDTH: u16 = 64;
const HEIGHT: u16 = 5;

/// Single-line text prompt (rename, export/import path).
#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, area: Rect, prompt: &TextPromptState) {
    let inner = popup::open(frame, area, WIDTH, HEIGHT, prompt.title());
    if inner.height < 2 {
        return;
    }
    let [field, hint] =
        Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).areas(inner);

    let prefix = format!("{} ", theme::PROMPT_CHAR);
    let line = Line::from(vec![
        Span::styled(prefix.clone(), Style::default().fg(theme::RUST_ORANGE)),
        Span::raw(prompt.value.clone()),
    ]);
    // Keep the end of long values in view
    let used =
        UnicodeWidthStr::width(prefix.as_str()) + UnicodeWidthStr::width(prompt.value.as_str());
    let overflow = used.saturating_sub(usize::from(field.width).saturating_sub(1));
    frame.render_widget(Paragraph::new(line).scroll((0, overflow as u16)), field);

    let cursor_x = field.x + (used - overflow).min(usize::from(field.width)) as u16;
    if cursor_x < field.right() {
        frame.set_cursor_position((cursor_x, field.y));
    }
    let hint_line = Line::from(popup::dim("Enter to confirm · Esc to cancel"));
    frame.render_widget(Paragraph::new(hint_line), hint);
}
