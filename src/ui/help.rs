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

use crate::app::commands::{SHORTCUTS, Shortcut};
use crate::ui::popup::{self, truncate_to_width};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Row, Table};
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: u16 = 2;
const POPUP_WIDTH: u16 = 76;

/// Keyboard shortcut table: keys, name, description.
#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, area: Rect) {
    let height = (SHORTCUTS.len() as u16).saturating_add(4);
    let inner = popup::open(frame, area, POPUP_WIDTH, height, "Keyboard Shortcuts");
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let keys_width =
        SHORTCUTS.iter().map(|s| UnicodeWidthStr::width(s.keys)).max().unwrap_or(0) as u16;
    let name_width =
        SHORTCUTS.iter().map(|s| UnicodeWidthStr::width(s.name)).max().unwrap_or(0) as u16;
    let desc_width =
        inner.width.saturating_sub(keys_width + name_width + COLUMN_GAP * 2) as usize;

    let rows: Vec<Row<'static>> =
        SHORTCUTS.iter().map(|shortcut| shortcut_row(shortcut, desc_width)).collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(keys_width),
            Constraint::Length(name_width),
            Constraint::Min(1),
        ],
    )
    .column_spacing(COLUMN_GAP);

    let [table_area, hint_area] = ratatui::layout::Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);
    frame.render_widget(table, table_area);
    frame.render_widget(
        Line::from(popup::dim("Esc to close")).alignment(ratatui::layout::Alignment::Right),
        hint_area,
    );
}

fn shortcut_row(shortcut: &Shortcut, desc_width: usize) -> Row<'static> {
    Row::new(vec![
        Cell::from(Span::styled(
            shortcut.keys,
            Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
        )),
        Cell::from(Span::styled(shortcut.name, Style::default().add_modifier(Modifier::BOLD))),
        Cell::from(Span::styled(
            truncate_to_width(shortcut.description, desc_width),
            Style::default().fg(theme::DIM),
        )),
    ])
}
