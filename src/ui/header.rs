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
use crate::store::DEFAULT_TITLE;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_PAD: u16 = 2;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + HEADER_PAD,
        y: area.y,
        width: area.width.saturating_sub(HEADER_PAD * 2),
        height: area.height,
    };

    let sep = Span::styled("  \u{2502}  ", Style::default().fg(theme::DIM));
    let title = app.current_summary().map_or(DEFAULT_TITLE, |s| s.title.as_str());
    let line = Line::from(vec![
        Span::styled(
            "artichat",
            Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
        ),
        sep,
        Span::styled(title.to_owned(), Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(line), padded);

    if let Some(status) = status_text(app) {
        let status = Line::from(Span::styled(status, Style::default().fg(theme::RUST_ORANGE)));
        frame.render_widget(Paragraph::new(status).alignment(Alignment::Right), padded);
    }
}

fn status_text(app: &App) -> Option<String> {
    if !app.is_streaming() {
        return None;
    }
    let ch = theme::SPINNER_FRAMES[app.spinner_frame % theme::SPINNER_FRAMES.len()];
    Some(format!("{ch} Streaming\u{2026}"))
}
