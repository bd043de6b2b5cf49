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

use super::history::DEFAULT_TITLE;
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_TITLE_CHARS: usize = 50;

#[allow(clippy::expect_used)]
static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("FENCED_CODE is a valid regex"));
#[allow(clippy::expect_used)]
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("INLINE_CODE is a valid regex"));
#[allow(clippy::expect_used)]
static EMPHASIS_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_~]").expect("EMPHASIS_MARKS is a valid regex"));
#[allow(clippy::expect_used)]
static NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("NEWLINES is a valid regex"));

/// Session title derived from the first user message.
pub fn generate_session_title(first_message: &str) -> String {
    generate_session_title_with(first_message, MAX_TITLE_CHARS)
}

pub fn generate_session_title_with(first_message: &str, max_chars: usize) -> String {
    if first_message.trim().is_empty() {
        return DEFAULT_TITLE.to_owned();
    }
    let title = FENCED_CODE.replace_all(first_message, "[code]");
    let title = INLINE_CODE.replace_all(&title, "[code]");
    let title = EMPHASIS_MARKS.replace_all(&title, "");
    let title = NEWLINES.replace_all(&title, " ");
    let title = title.trim();

    if title.chars().count() > max_chars {
        let head: String = title.chars().take(max_chars).collect();
        return format!("{}...", head.trim());
    }
    if title.is_empty() { DEFAULT_TITLE.to_owned() } else { title.to_owned() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_emphasis_and_code_and_joins_lines() {
        assert_eq!(generate_session_title("Hello **world**\n\n`code`"), "Hello world [code]");
    }

    #[test]
    fn fenced_blocks_collapse_to_placeholder() {
        assert_eq!(
            generate_session_title("Fix this:\n```rust\nfn main() {}\n```\nplease"),
            "Fix this: [code] please"
        );
    }

    #[test]
    fn long_titles_are_truncated_with_ellipsis() {
        let title = generate_session_title(&"word ".repeat(20));
        assert_eq!(title, format!("{}...", "word ".repeat(10).trim()));
        assert!(title.chars().count() <= MAX_TITLE_CHARS + 3);
    }

    #[test]
    fn exact_length_is_kept() {
        let text = "x".repeat(MAX_TITLE_CHARS);
        assert_eq!(generate_session_title(&text), text);
    }

    #[test]
    fn empty_or_marker_only_input_is_new_chat() {
        assert_eq!(generate_session_title(""), "New Chat");
        assert_eq!(generate_session_title("  \n "), "New Chat");
        assert_eq!(generate_session_title("***"), "New Chat");
    }

    #[test]
    fn custom_limit_counts_characters() {
        assert_eq!(generate_session_title_with("ééééé", 3), "ééé...");
    }
}
