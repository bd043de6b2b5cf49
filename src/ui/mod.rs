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

mod artifact;
mod autocomplete;
mod chat;
mod command_menu;
mod dialog;
mod header;
mod help;
mod input;
mod layout;
mod markup;
mod message;
mod popup;
mod prompt_picker;
mod search;
mod sidebar;
pub mod theme;

use crate::app::{App, Focus, NoticeKind, Overlay};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = frame.area();
    let input_visual_lines = input::visual_line_count(app, frame_area.width);
    let areas = layout::compute(frame_area, input_visual_lines, app.show_sidebar);

    if areas.sidebar.width > 0 {
        sidebar::render(frame, areas.sidebar, app);
    }

    if areas.header.height > 0 {
        header::render(frame, areas.header, app);
        render_separator(frame, areas.header_sep);
    }

    // Body: chat (includes welcome text when no messages yet)
    chat::render(frame, areas.body, app);

    render_separator(frame, areas.input_sep);
    let input_focused = app.focus == Focus::Input && app.overlay.is_none();
    input::render(frame, areas.input, app, input_focused);
    render_separator(frame, areas.input_bottom_sep);

    // Autocomplete dropdown (floating overlay above input)
    if autocomplete::is_active(app) {
        autocomplete::render(frame, areas.input, app);
    }

    if let Some(footer_area) = areas.footer {
        render_footer(frame, footer_area, app);
    }

    // Modal overlays draw last, over everything else
    match &app.overlay {
        Some(Overlay::CommandMenu(menu)) => command_menu::render(frame, frame_area, menu),
        Some(Overlay::Prompts(picker)) => prompt_picker::render(frame, frame_area, picker),
        Some(Overlay::Search(search)) => search::render(frame, frame_area, search),
        Some(Overlay::Artifacts(viewer)) => artifact::render_viewer(frame, frame_area, viewer),
        Some(Overlay::Help) => help::render(frame, frame_area),
        Some(Overlay::TextPrompt(prompt)) => dialog::render(frame, frame_area, prompt),
        None => {}
    }
}

const FOOTER_PAD: u16 = 2;
const FOOTER_COLUMN_GAP: u16 = 1;
const FOOTER_HINT: &str = "Ctrl+K commands \u{00B7} F1 shortcuts \u{00B7} Ctrl+Q quit";

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };

    let line = match &app.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Info => theme::NOTICE_INFO,
                NoticeKind::Error => theme::NOTICE_ERROR,
            };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(FOOTER_HINT, Style::default().fg(theme::DIM))),
    };

    let (left_area, right_area) = split_footer_columns(padded);
    frame.render_widget(Paragraph::new(line), left_area);
    let source = format!("source: {}", app.options.source_label);
    render_footer_right_info(frame, right_area, &source, theme::DIM);
}

fn split_footer_columns(area: Rect) -> (Rect, Rect) {
    if area.width == 0 {
        return (area, Rect { width: 0, ..area });
    }

    let gap = if area.width > 2 { FOOTER_COLUMN_GAP } else { 0 };
    let usable_width = area.width.saturating_sub(gap);
    let left_width = usable_width.saturating_add(1) / 2;
    let right_width = usable_width.saturating_sub(left_width);

    let left = Rect { width: left_width, ..area };
    let right = Rect {
        x: area.x.saturating_add(left_width).saturating_add(gap),
        width: right_width,
        ..area
    };
    (left, right)
}

fn fit_footer_right_text(text: &str, max_width: usize) -> Option<String> {
    if max_width == 0 || text.trim().is_empty() {
        return None;
    }
    if UnicodeWidthStr::width(text) <= max_width {
        return Some(text.to_owned());
    }
    if max_width <= 3 {
        return Some(".".repeat(max_width));
    }

    let mut fitted = String::new();
    let mut width: usize = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width.saturating_add(ch_width).saturating_add(3) > max_width {
            break;
        }
        fitted.push(ch);
        width = width.saturating_add(ch_width);
    }
    fitted.push_str("...");
    Some(fitted)
}

fn render_footer_right_info(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    if area.width == 0 {
        return;
    }
    let Some(fitted) = fit_footer_right_text(text, usize::from(area.width)) else {
        return;
    };
    let line = Line::from(Span::styled(fitted, Style::default().fg(color)));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(area.width as usize);
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_footer_columns_preserves_total_width() {
        let area = Rect::new(0, 0, 80, 1);
        let (left, right) = split_footer_columns(area);
        assert_eq!(left.width.saturating_add(right.width).saturating_add(FOOTER_COLUMN_GAP), 80);
        assert_eq!(left.width, 40);
        assert_eq!(right.width, 39);
    }

    #[test]
    fn split_footer_columns_zero_width() {
        let (left, right) = split_footer_columns(Rect::new(0, 0, 0, 1));
        assert_eq!(left.width, 0);
        assert_eq!(right.width, 0);
    }

    #[test]
    fn fit_footer_right_text_truncates_when_needed() {
        let fitted = fit_footer_right_text("source: http://127.0.0.1:8787", 12).unwrap();
        assert_eq!(fitted, "source: h...");
        assert!(UnicodeWidthStr::width(fitted.as_str()) <= 12);
    }

    #[test]
    fn fit_footer_right_text_keeps_short_text() {
        assert_eq!(fit_footer_right_text("source: local", 20).as_deref(), Some("source: local"));
        assert_eq!(fit_footer_right_text("  ", 20), None);
        assert_eq!(fit_footer_right_text("abcdef", 2).as_deref(), Some(".."));
    }
}
