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

use crate::app::overlay::SessionSearchState;
use crate::model::SearchResultKind;
use crate::ui::autocomplete::highlighted_spans;
use crate::ui::popup::{self, truncate_to_width};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 20;
/// Rows per result: title and preview.
const RESULT_ROWS: usize = 2;

pub fn render(frame: &mut Frame, area: Rect, search: &SessionSearchState) {
    let inner = popup::open(frame, area, WIDTH, HEIGHT, "Search Chats");
    if inner.height < 3 {
        return;
    }
    let [filter, list] = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);
    frame.render_widget(
        Paragraph::new(popup::filter_line(&search.query, "Search titles and messages...")),
        filter,
    );

    if search.results.is_empty() {
        let text = if search.query.trim().is_empty() {
            "   Type to search your chats"
        } else {
            "   No results found"
        };
        frame.render_widget(Paragraph::new(Line::from(popup::dim(text))), list);
        return;
    }

    let capacity = (usize::from(list.height) / RESULT_ROWS).max(1);
    let start = popup::window_start(search.selected, capacity);
    let preview_width = usize::from(list.width).saturating_sub(5);
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (i, result) in search.results.iter().enumerate().skip(start).take(capacity) {
        let badge = match result.kind {
            SearchResultKind::Session => "chat",
            SearchResultKind::Message => "message",
        };
        let mut title = vec![Span::styled(
            result.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        title.push(popup::dim(format!("  {badge}")));
        lines.push(popup::list_row(i == search.selected, title));

        let preview = truncate_to_width(&result.preview.replace('\n', " "), preview_width);
        let mut preview_line = vec![Span::raw("     ")];
        preview_line.extend(highlighted_spans(&preview, &search.query));
        lines.push(Line::from(preview_line));
    }
    frame.render_widget(Paragraph::new(lines), list);
}
