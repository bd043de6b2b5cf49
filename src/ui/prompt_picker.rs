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

use crate::app::overlay::{PromptPickerState, PromptRow};
use crate::ui::autocomplete::highlighted_spans;
use crate::ui::popup;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

const WIDTH: u16 = 72;
const HEIGHT: u16 = 22;

pub fn render(frame: &mut Frame, area: Rect, picker: &PromptPickerState) {
    let inner = popup::open(frame, area, WIDTH, HEIGHT, "Prompt Library");
    if inner.height < 6 {
        return;
    }
    let [filter, list, detail] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(3),
    ])
    .areas(inner);
    frame.render_widget(
        Paragraph::new(popup::filter_line(&picker.query, "Search prompts...")),
        filter,
    );

    let rows = picker.rows();
    if rows.is_empty() {
        frame.render_widget(Paragraph::new(Line::from(popup::dim("   No prompts found"))), list);
        return;
    }

    let mut lines: Vec<Line<'static>> = Vec::with_capacity(rows.len());
    let mut selected_row = 0;
    let mut prompt_index = 0;
    for row in rows {
        match row {
            PromptRow::Category(name) => {
                lines.push(Line::from(Span::styled(
                    format!(" {name}"),
                    Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
                )));
            }
            PromptRow::Prompt(prompt) => {
                let selected = prompt_index == picker.selected;
                if selected {
                    selected_row = lines.len();
                }
                let mut spans = highlighted_spans(prompt.title, &picker.query);
                spans.push(popup::dim(format!("  {}", prompt.category)));
                lines.push(popup::list_row(selected, spans));
                prompt_index += 1;
            }
        }
    }
    let start = popup::window_start(selected_row, usize::from(list.height));
    let visible: Vec<Line<'static>> = lines.into_iter().skip(start).collect();
    frame.render_widget(Paragraph::new(visible), list);

    if let Some(prompt) = picker.selected_prompt() {
        let text = vec![
            Line::from(popup::dim(prompt.description)),
            Line::from(Span::raw(prompt.content)),
        ];
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), detail);
    }
}
