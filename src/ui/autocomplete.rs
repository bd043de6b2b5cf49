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
use crate::app::autocomplete::MAX_VISIBLE;
use crate::markup::highlight;
use crate::search::QueryResults;
use crate::ui::input::{INPUT_PAD, PROMPT_WIDTH};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Max dropdown width (characters).
const MAX_WIDTH: u16 = 60;

pub fn is_active(app: &App) -> bool {
    app.autocomplete.is_open() && app.autocomplete.active_key().is_some()
}

/// Rows inside the border: the visible results, or one status row.
#[allow(clippy::cast_possible_truncation)]
fn body_rows(app: &App) -> u16 {
    match app.autocomplete.result_count() {
        0 => 1,
        n => n.min(MAX_VISIBLE) as u16,
    }
}

fn title(app: &App) -> String {
    let count = app.autocomplete.result_count();
    if app.autocomplete.is_mention() {
        format!(" People ({count}) ")
    } else {
        format!(" Suggestions ({count}) ")
    }
}

/// Label split around the query, the match drawn in the accent color.
pub fn highlighted_spans(label: &str, query: &str) -> Vec<Span<'static>> {
    let parts = highlight(label, query);
    let mut spans = Vec::with_capacity(3);
    if !parts.before.is_empty() {
        spans.push(Span::raw(parts.before.to_owned()));
    }
    if parts.has_match() {
        spans.push(Span::styled(
            parts.matched.to_owned(),
            Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
        ));
    }
    if !parts.after.is_empty() {
        spans.push(Span::raw(parts.after.to_owned()));
    }
    spans
}

fn body_lines(app: &App) -> Vec<Line<'static>> {
    let state = &app.autocomplete;
    if let Some(error) = &state.error {
        return vec![Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(theme::NOTICE_ERROR),
        ))];
    }
    let Some(results) = state.results.as_ref().filter(|r| !r.is_empty()) else {
        let text = if state.loading { " Searching…" } else { " No results found" };
        return vec![Line::from(Span::styled(text, Style::default().fg(theme::DIM)))];
    };

    let query = state.active_key().map_or("", |key| key.text());
    // Keep the selection inside the visible window
    let start = (state.selected + 1).saturating_sub(MAX_VISIBLE);
    let labels = results.labels();
    labels
        .iter()
        .enumerate()
        .skip(start)
        .take(MAX_VISIBLE)
        .map(|(i, label)| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            if i == state.selected {
                spans.push(Span::styled(
                    theme::SELECT_MARKER,
                    Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::raw("   "));
            }
            if matches!(results, QueryResults::People(_)) {
                spans.push(Span::styled("@", Style::default().fg(theme::DIM)));
            }
            spans.extend(highlighted_spans(label, query));
            Line::from(spans)
        })
        .collect()
}

/// Render the dropdown as a floating overlay above the input area.
pub fn render(frame: &mut Frame, input_area: Rect, app: &App) {
    if !is_active(app) {
        return;
    }
    let height = body_rows(app).saturating_add(2); // +2 for top/bottom border

    // Position: above input, aligned with text start
    let x = input_area.x + INPUT_PAD + PROMPT_WIDTH;
    let width = input_area.width.saturating_sub(INPUT_PAD * 2 + PROMPT_WIDTH).min(MAX_WIDTH);
    let y = input_area.y.saturating_sub(height);
    let dropdown_area = Rect { x, y, width, height: height.min(input_area.y) };
    if dropdown_area.height < 3 {
        return;
    }

    let block = Block::default()
        .title(Span::styled(title(app), Style::default().fg(theme::DIM)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::DIM));

    let paragraph = Paragraph::new(body_lines(app)).block(block);
    // Clear the area first so the overlay has a solid background
    frame.render_widget(ratatui::widgets::Clear, dropdown_area);
    frame.render_widget(paragraph, dropdown_area);
}
