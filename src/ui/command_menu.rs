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

use crate::app::overlay::CommandMenuState;
use crate::ui::popup;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const WIDTH: u16 = 60;
const HEIGHT: u16 = 16;

pub fn render(frame: &mut Frame, area: Rect, menu: &CommandMenuState) {
    let inner = popup::open(frame, area, WIDTH, HEIGHT, "Commands");
    if inner.height < 3 {
        return;
    }
    let [filter, list] = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);
    frame.render_widget(
        Paragraph::new(popup::filter_line(&menu.query, "Type a command...")),
        filter,
    );

    let commands = menu.commands();
    if commands.is_empty() {
        frame.render_widget(Paragraph::new(Line::from(popup::dim("   No commands found"))), list);
        return;
    }

    // Group headers wherever the group changes
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut selected_row = 0;
    let mut group = "";
    for (i, command) in commands.iter().enumerate() {
        if command.group() != group {
            group = command.group();
            lines.push(Line::from(popup::dim(format!(" {group}"))));
        }
        if i == menu.selected {
            selected_row = lines.len();
        }
        let mut spans = vec![Span::raw(command.label())];
        if let Some(keys) = command.shortcut() {
            spans.push(popup::dim(format!("  {keys}")));
        }
        lines.push(popup::list_row(i == menu.selected, spans));
    }

    let start = popup::window_start(selected_row, usize::from(list.height));
    let visible: Vec<Line<'static>> = lines.into_iter().skip(start).collect();
    frame.render_widget(Paragraph::new(visible), list);
}
