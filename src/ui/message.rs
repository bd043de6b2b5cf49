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

use crate::markup::inline::plain_text;
use crate::markup::{Artifact, RenderBlock, parse_blocks};
use crate::model::{Message, Role};
use crate::ui::artifact::inline_box;
use crate::ui::markup::markup_spans;
use crate::ui::theme;
use chrono::{Local, TimeZone};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Cursor glyph appended to a reply while it streams.
const STREAM_CURSOR: &str = "▌";

fn time_label(timestamp: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp)
        .single()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

fn header(msg: &Message) -> Line<'static> {
    let (label, color) = match msg.role {
        Role::User => ("You", theme::ROLE_USER),
        Role::Assistant => ("Assistant", theme::ROLE_ASSISTANT),
    };
    Line::from(vec![
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", time_label(msg.timestamp)), Style::default().fg(theme::DIM)),
    ])
}

/// Lines for one parsed block of an assistant reply.
fn block_lines(block: &RenderBlock, width: u16, out: &mut Vec<Line<'static>>) {
    match block {
        RenderBlock::Heading { level, text } => {
            let mut style = Style::default().fg(theme::HEADING_FG).add_modifier(Modifier::BOLD);
            if *level == 1 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            out.push(Line::from(Span::styled(plain_text(text), style)));
        }
        RenderBlock::ListItem(html) => {
            let mut spans = vec![Span::styled("  • ", Style::default().fg(theme::RUST_ORANGE))];
            spans.extend(markup_spans(html, Style::default()));
            out.push(Line::from(spans));
        }
        RenderBlock::Paragraph(html) => out.push(Line::from(markup_spans(html, Style::default()))),
        RenderBlock::BoldParagraph(text) => out.push(Line::from(Span::styled(
            plain_text(text),
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        RenderBlock::CodeArtifact { .. } | RenderBlock::MarkdownArtifact(_) => {
            if let Some(artifact) = Artifact::from_block(block) {
                out.extend(inline_box(&artifact, width));
            }
        }
    }
}

/// Render a single chat message into `out`, followed by a blank separator.
pub fn render_message(
    msg: &Message,
    spinner_frame: usize,
    width: u16,
    out: &mut Vec<Line<'static>>,
) {
    out.push(header(msg));
    match msg.role {
        Role::User => {
            // Plain text on a tinted background, one line per input line
            let style = Style::default().bg(theme::USER_MSG_BG);
            for line in msg.content.lines() {
                out.push(Line::from(Span::styled(format!(" {line} "), style)));
            }
        }
        Role::Assistant if msg.is_streaming && msg.content.is_empty() => {
            let ch = theme::SPINNER_FRAMES[spinner_frame % theme::SPINNER_FRAMES.len()];
            out.push(Line::from(Span::styled(
                format!("{ch} Thinking..."),
                Style::default().fg(theme::DIM),
            )));
        }
        Role::Assistant => {
            let first_body_line = out.len();
            for block in parse_blocks(&msg.content) {
                block_lines(&block, width, out);
            }
            if msg.is_streaming {
                let cursor = Span::styled(STREAM_CURSOR, Style::default().fg(theme::RUST_ORANGE));
                let has_body = out.len() > first_body_line;
                match out.last_mut() {
                    Some(last) if has_body => last.spans.push(cursor),
                    _ => out.push(Line::from(cursor)),
                }
            }
        }
    }
    out.push(Line::default());
}
