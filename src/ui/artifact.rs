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

use crate::app::overlay::ArtifactViewerState;
use crate::markup::{Artifact, ArtifactLine, ArtifactView, inline::plain_text};
use crate::ui::markup::markup_spans;
use crate::ui::popup;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const BOX_SIDE: &str = "│ ";

fn border(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(theme::ARTIFACT_BORDER))
}

/// Styled spans of one artifact body line.
pub fn body_line_spans(line: &ArtifactLine) -> Vec<Span<'static>> {
    match line {
        ArtifactLine::Code(text) => {
            vec![Span::styled(text.clone(), Style::default().fg(theme::CODE_FG))]
        }
        ArtifactLine::Heading { level, html } => {
            let mut style = Style::default().fg(theme::HEADING_FG).add_modifier(Modifier::BOLD);
            if *level == 1 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            markup_spans(html, style)
        }
        ArtifactLine::ListItem(html) => {
            let mut spans = vec![Span::styled("• ", Style::default().fg(theme::RUST_ORANGE))];
            spans.extend(markup_spans(html, Style::default()));
            spans
        }
        ArtifactLine::Bold(html) => {
            vec![Span::styled(plain_text(html), Style::default().add_modifier(Modifier::BOLD))]
        }
        ArtifactLine::Text(html) => markup_spans(html, Style::default()),
    }
}

/// An artifact as a bordered box of chat lines: title bar, compact preview
/// and a footer naming the hidden lines.
pub fn inline_box(artifact: &Artifact, width: u16) -> Vec<Line<'static>> {
    let view = artifact.preview();
    let rule_width = usize::from(width).saturating_sub(2).max(8);

    let title = format!("─ {} ", artifact.title());
    let fill = rule_width.saturating_sub(title.chars().count());
    let mut lines = vec![Line::from(vec![
        border("╭"),
        border(title),
        border("─".repeat(fill)),
    ])];

    for line in &view.lines {
        let mut spans = vec![border(BOX_SIDE)];
        spans.extend(body_line_spans(line));
        lines.push(Line::from(spans));
    }

    let footer = if view.is_truncated() {
        format!("─ {} more lines · Ctrl+O to open ", view.hidden_lines)
    } else {
        "─ Ctrl+O to open ".to_owned()
    };
    let fill = rule_width.saturating_sub(footer.chars().count());
    lines.push(Line::from(vec![border("╰"), border(footer), border("─".repeat(fill))]));
    lines
}

/// Full-screen artifact viewer overlay.
#[allow(clippy::cast_possible_truncation)]
pub fn render_viewer(frame: &mut Frame, area: Rect, viewer: &ArtifactViewerState) {
    let Some(artifact) = viewer.current() else {
        return;
    };
    let title = format!(
        "{} ({}/{}) · {} lines",
        artifact.title(),
        viewer.index + 1,
        viewer.artifacts.len(),
        artifact.line_count()
    );
    let width = area.width.saturating_sub(4);
    let height = area.height.saturating_sub(2);
    let inner = popup::open(frame, area, width, height, &title);
    if inner.height < 2 {
        return;
    }
    let [body, hint] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let view: ArtifactView = if viewer.expanded { artifact.expanded() } else { artifact.preview() };
    let mut lines: Vec<Line<'static>> =
        view.lines.iter().map(|line| Line::from(body_line_spans(line))).collect();
    if view.is_truncated() {
        lines.push(Line::from(popup::dim(format!("… {} more lines", view.hidden_lines))));
    }
    let scroll = viewer.scroll.min(usize::from(u16::MAX)) as u16;
    let paragraph = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(paragraph, body);

    let mode = if viewer.expanded { "e: collapse" } else { "e: expand" };
    let hint_line = Line::from(popup::dim(format!(
        "←/→ switch · ↑/↓ scroll · {mode} · c: copy · Esc: close"
    )));
    frame.render_widget(Paragraph::new(hint_line), hint);
}
