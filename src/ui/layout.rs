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

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the session sidebar when shown.
pub const SIDEBAR_WIDTH: u16 = 30;
/// Below this terminal width the sidebar is not drawn even when toggled on.
pub const SIDEBAR_MIN_TERMINAL_WIDTH: u16 = 70;

pub struct AppLayout {
    /// Zero-width when hidden.
    pub sidebar: Rect,
    pub header: Rect,
    pub header_sep: Rect,
    pub body: Rect,
    pub input_sep: Rect,
    pub input: Rect,
    pub input_bottom_sep: Rect,
    pub footer: Option<Rect>,
}

pub fn compute(area: Rect, input_lines: u16, show_sidebar: bool) -> AppLayout {
    let sidebar_width =
        if show_sidebar && area.width >= SIDEBAR_MIN_TERMINAL_WIDTH { SIDEBAR_WIDTH } else { 0 };
    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(1)]).areas(area);

    let input_height = input_lines.max(1);
    let zero = Rect::new(main.x, main.y, main.width, 0);

    if main.height < 8 {
        // Ultra-compact: chat and input only
        let [body, input, input_bottom_sep] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .areas(main);
        AppLayout {
            sidebar,
            header: zero,
            header_sep: zero,
            body,
            input_sep: Rect::new(main.x, input.y, main.width, 0),
            input,
            input_bottom_sep,
            footer: None,
        }
    } else {
        let [header, header_sep, body, input_sep, input, input_bottom_sep, footer] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(input_height),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(main);
        AppLayout {
            sidebar,
            header,
            header_sep,
            body,
            input_sep,
            input,
            input_bottom_sep,
            footer: Some(footer),
        }
    }
}

/// Rectangle of at most `width` x `height` centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    // =====
    // TESTS: 8
    // =====

    use super::*;
    use pretty_assertions::assert_eq;

    fn area(w: u16, h: u16) -> Rect {
        Rect::new(0, 0, w, h)
    }

    fn total_height(layout: &AppLayout) -> u16 {
        layout.header.height
            + layout.header_sep.height
            + layout.body.height
            + layout.input_sep.height
            + layout.input.height
            + layout.input_bottom_sep.height
            + layout.footer.map_or(0, |f| f.height)
    }

    #[test]
    fn normal_terminal_areas_sum_to_total() {
        let layout = compute(area(100, 30), 3, true);
        assert_eq!(total_height(&layout), 30);
        assert_eq!(layout.input.height, 3);
        assert!(layout.footer.is_some());
    }

    #[test]
    fn sidebar_takes_fixed_width_when_shown() {
        let layout = compute(area(100, 30), 1, true);
        assert_eq!(layout.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.body.x, SIDEBAR_WIDTH);
        assert_eq!(layout.body.width, 100 - SIDEBAR_WIDTH);
    }

    #[test]
    fn hidden_sidebar_gives_full_width() {
        let layout = compute(area(100, 30), 1, false);
        assert_eq!(layout.sidebar.width, 0);
        assert_eq!(layout.body.width, 100);
    }

    #[test]
    fn narrow_terminal_drops_sidebar() {
        let layout = compute(area(SIDEBAR_MIN_TERMINAL_WIDTH - 1, 30), 1, true);
        assert_eq!(layout.sidebar.width, 0);
    }

    #[test]
    fn ultra_compact_has_no_header_or_footer() {
        let layout = compute(area(80, 6), 1, false);
        assert_eq!(layout.header.height, 0);
        assert!(layout.footer.is_none());
        assert_eq!(total_height(&layout), 6);
    }

    #[test]
    fn areas_are_ordered_top_to_bottom() {
        let layout = compute(area(80, 24), 2, false);
        let areas = [
            layout.header,
            layout.header_sep,
            layout.body,
            layout.input_sep,
            layout.input,
            layout.input_bottom_sep,
        ];
        for pair in areas.windows(2) {
            assert!(pair[0].y + pair[0].height <= pair[1].y, "{:?} before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let rect = centered(Rect::new(10, 5, 80, 20), 40, 10);
        assert_eq!(rect, Rect::new(30, 10, 40, 10));
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let rect = centered(area(20, 5), 40, 10);
        assert_eq!(rect, area(20, 5));
    }
}
