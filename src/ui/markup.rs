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

//! Rendered inline markup to styled ratatui spans.

use crate::markup::{MarkupSpan, parse_markup};
use crate::ui::theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

fn span_style(span: &MarkupSpan, base: Style) -> Style {
    let mut style = base;
    if span.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if span.em {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if span.code {
        style = style.fg(theme::INLINE_CODE_FG);
    }
    style
}

/// Spans for a fragment of rendered inline markup, on top of `base`.
pub fn markup_spans(html: &str, base: Style) -> Vec<Span<'static>> {
    parse_markup(html)
        .iter()
        .map(|span| Span::styled(span.text.clone(), span_style(span, base)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::inline::render_inline;
    use pretty_assertions::assert_eq;

    #[test]
    fn emphasis_and_code_map_to_styles() {
        let spans = markup_spans(&render_inline("a **b** *c* `d`"), Style::default());
        let texts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["a ", "b", " ", "c", " ", "d"]);
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(spans[3].style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(spans[5].style.fg, Some(theme::INLINE_CODE_FG));
    }

    #[test]
    fn entities_are_decoded() {
        let spans = markup_spans(&render_inline("a < b & c"), Style::default());
        assert_eq!(spans[0].content, "a < b & c");
    }
}
