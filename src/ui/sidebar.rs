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
use crate::model::SessionSummary;
use crate::ui::popup::{self, truncate_to_width};
use crate::ui::theme;
use chrono::{DateTime, Local, TimeZone};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Rows used per session entry: title and date.
const ENTRY_ROWS: usize = 2;

/// "Today 14:05", "Yesterday 09:12" or "Mar 3".
fn date_label(timestamp: i64, now: DateTime<Local>) -> String {
    let Some(time) = Local.timestamp_millis_opt(timestamp).single() else {
        return String::new();
    };
    let days = (now.date_naive() - time.date_naive()).num_days();
    match days {
        0 => format!("Today {}", time.format("%H:%M")),
        1 => format!("Yesterday {}", time.format("%H:%M")),
        _ => time.format("%b %-d").to_string(),
    }
}

fn entry_lines(
    session: &SessionSummary,
    selected: bool,
    current: bool,
    width: usize,
    now: DateTime<Local>,
) -> [Line<'static>; 2] {
    let mut title_style = Style::default();
    if current {
        title_style = title_style.fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD);
    }
    let title = truncate_to_width(&session.title, width.saturating_sub(3));
    [
        popup::list_row(selected, vec![Span::styled(title, title_style)]),
        Line::from(popup::dim(format!("   {}", date_label(session.timestamp, now)))),
    ]
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let focused = app.focus == Focus::Sidebar;
    let border_color = if focused { theme::RUST_ORANGE } else { theme::DIM };
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" Chats ({}) ", app.sessions.len()),
            Style::default().fg(theme::DIM),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [list_area, hint_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    if app.sessions.is_empty() {
        frame.render_widget(Paragraph::new(Line::from(popup::dim(" No chats yet"))), list_area);
    } else {
        let capacity = (usize::from(list_area.height) / ENTRY_ROWS).max(1);
        let start = popup::window_start(app.sidebar_selected, capacity);
        let now = Local::now();
        let width = usize::from(list_area.width);
        let lines: Vec<Line<'static>> = app
            .sessions
            .iter()
            .enumerate()
            .skip(start)
            .take(capacity)
            .flat_map(|(i, session)| {
                let selected = focused && i == app.sidebar_selected;
                let current = app.current_session.as_deref() == Some(session.id.as_str());
                entry_lines(session, selected, current, width, now)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);
    }

    let hint = if focused { " n new · r rename · d delete" } else { " Tab to browse" };
    frame.render_widget(Paragraph::new(Line::from(popup::dim(hint))), hint_area);
}
