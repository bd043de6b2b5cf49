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

//! Inline markup pipeline: HTML escaping followed by an ordered list of
//! emphasis/code substitutions, plus a tokenizer for reading the result back.

use regex::Regex;
use std::sync::LazyLock;

// Patterns are literals; compilation cannot fail at runtime.
#[allow(clippy::expect_used)]
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("BOLD is a valid regex"));
#[allow(clippy::expect_used)]
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("EMPHASIS is a valid regex"));
#[allow(clippy::expect_used)]
static STRICT_EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").expect("STRICT_EMPHASIS is a valid regex")
});
#[allow(clippy::expect_used)]
static UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.+?)_").expect("UNDERSCORE is a valid regex"));
#[allow(clippy::expect_used)]
static CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("CODE is a valid regex"));

/// Marks a protected code span while emphasis passes run (strict mode).
const CODE_SLOT: char = '\u{E000}';

/// How single-asterisk emphasis and code spans interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmphasisMode {
    /// Substitutions run in fixed order (bold, `*em*`, `_em_`, code). A single
    /// `*` run may pair with any later `*` on the line, and asterisks inside
    /// backticks are still treated as emphasis.
    #[default]
    Lenient,
    /// Code spans are lifted out before the emphasis passes and `*em*` needs
    /// non-space characters next to both delimiters.
    Strict,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one line of chat text using [`EmphasisMode::Lenient`].
pub fn render_inline(text: &str) -> String {
    render_inline_with(text, EmphasisMode::Lenient)
}

pub fn render_inline_with(text: &str, mode: EmphasisMode) -> String {
    // Escaping first: the tags inserted below must never be escaped again.
    let escaped = escape_html(text);
    match mode {
        EmphasisMode::Lenient => {
            let html = BOLD.replace_all(&escaped, "<strong>${1}</strong>");
            let html = EMPHASIS.replace_all(&html, "<em>${1}</em>");
            let html = UNDERSCORE.replace_all(&html, "<em>${1}</em>");
            CODE.replace_all(&html, "<code>${1}</code>").into_owned()
        }
        EmphasisMode::Strict => {
            let mut spans: Vec<String> = Vec::new();
            let html = CODE.replace_all(&escaped, |caps: &regex::Captures<'_>| {
                spans.push(caps[1].to_owned());
                format!("{CODE_SLOT}{}{CODE_SLOT}", spans.len() - 1)
            });
            let html = BOLD.replace_all(&html, "<strong>${1}</strong>");
            let html = STRICT_EMPHASIS.replace_all(&html, "<em>${1}</em>");
            let html = UNDERSCORE.replace_all(&html, "<em>${1}</em>");
            restore_code_slots(&html, &spans)
        }
    }
}

fn restore_code_slots(html: &str, spans: &[String]) -> String {
    let mut out = String::with_capacity(html.len());
    let mut parts = html.split(CODE_SLOT);
    out.push_str(parts.next().unwrap_or_default());
    // Slots alternate: index, trailing text, index, trailing text, ...
    while let Some(slot) = parts.next() {
        let rest = parts.next();
        match (slot.parse::<usize>().ok().and_then(|i| spans.get(i)), rest) {
            (Some(code), Some(rest)) => {
                out.push_str("<code>");
                out.push_str(code);
                out.push_str("</code>");
                out.push_str(rest);
            }
            (_, rest) => {
                out.push(CODE_SLOT);
                out.push_str(slot);
                if let Some(rest) = rest {
                    out.push(CODE_SLOT);
                    out.push_str(rest);
                }
            }
        }
    }
    out
}

/// A run of text sharing the same inline styles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupSpan {
    pub text: String,
    pub strong: bool,
    pub em: bool,
    pub code: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Strong,
    Em,
    Code,
}

const TAGS: &[(&str, Tag, bool)] = &[
    ("<strong>", Tag::Strong, true),
    ("</strong>", Tag::Strong, false),
    ("<em>", Tag::Em, true),
    ("</em>", Tag::Em, false),
    ("<code>", Tag::Code, true),
    ("</code>", Tag::Code, false),
];

const ENTITIES: &[(&str, char)] =
    &[("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>'), ("&quot;", '"'), ("&#39;", '\'')];

enum Token {
    Text(char),
    Open(Tag),
    Close(Tag),
}

fn tokenize(html: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(html.len());
    let mut rest = html;
    'outer: while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            for (literal, tag, open) in TAGS {
                if let Some(after) = rest.strip_prefix(literal) {
                    tokens.push(if *open { Token::Open(*tag) } else { Token::Close(*tag) });
                    rest = after;
                    continue 'outer;
                }
            }
        } else if ch == '&' {
            for (entity, decoded) in ENTITIES {
                if let Some(after) = rest.strip_prefix(entity) {
                    tokens.push(Token::Text(*decoded));
                    rest = after;
                    continue 'outer;
                }
            }
        }
        tokens.push(Token::Text(ch));
        rest = &rest[ch.len_utf8()..];
    }
    tokens
}

/// Split rendered inline markup into styled runs with entities decoded.
pub fn parse_markup(html: &str) -> Vec<MarkupSpan> {
    let mut spans: Vec<MarkupSpan> = Vec::new();
    let (mut strong, mut em, mut code) = (0usize, 0usize, 0usize);
    for token in tokenize(html) {
        match token {
            Token::Open(Tag::Strong) => strong += 1,
            Token::Open(Tag::Em) => em += 1,
            Token::Open(Tag::Code) => code += 1,
            Token::Close(Tag::Strong) => strong = strong.saturating_sub(1),
            Token::Close(Tag::Em) => em = em.saturating_sub(1),
            Token::Close(Tag::Code) => code = code.saturating_sub(1),
            Token::Text(ch) => {
                let style = (strong > 0, em > 0, code > 0);
                match spans.last_mut() {
                    Some(last) if (last.strong, last.em, last.code) == style => last.text.push(ch),
                    _ => spans.push(MarkupSpan {
                        text: ch.to_string(),
                        strong: style.0,
                        em: style.1,
                        code: style.2,
                    }),
                }
            }
        }
    }
    spans
}

/// Text content of rendered markup, tags dropped and entities decoded.
pub fn plain_text(html: &str) -> String {
    parse_markup(html).into_iter().map(|span| span.text).collect()
}

/// Turn rendered markup back into the markdown that produces it.
pub fn to_markdown(html: &str) -> String {
    let tokens = tokenize(html);
    let mut out = String::with_capacity(html.len());
    let mut em_delimiters: Vec<char> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Text(ch) => out.push(*ch),
            Token::Open(Tag::Strong) | Token::Close(Tag::Strong) => out.push_str("**"),
            Token::Open(Tag::Em) => {
                let delimiter = em_delimiter(&tokens[i + 1..]);
                em_delimiters.push(delimiter);
                out.push(delimiter);
            }
            Token::Close(Tag::Em) => out.push(em_delimiters.pop().unwrap_or('*')),
            Token::Open(Tag::Code) | Token::Close(Tag::Code) => out.push('`'),
        }
    }
    out
}

/// `_` when the emphasized run contains an asterisk, `*` otherwise.
fn em_delimiter(after_open: &[Token]) -> char {
    let has_asterisk = after_open
        .iter()
        .take_while(|token| !matches!(token, Token::Close(Tag::Em)))
        .any(|token| matches!(token, Token::Text('*')));
    if has_asterisk { '_' } else { '*' }
}
