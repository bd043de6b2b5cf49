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

/// A label split around the first case-insensitive match of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight<'a> {
    pub before: &'a str,
    pub matched: &'a str,
    pub after: &'a str,
}

impl<'a> Highlight<'a> {
    fn unmatched(text: &'a str) -> Self {
        Self { before: text, matched: "", after: "" }
    }

    pub fn has_match(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Split `text` around the first occurrence of `query` (trimmed, compared
/// case-insensitively). Offsets are taken from `text` itself, so labels whose
/// lowercase form has a different byte length are still sliced on char
/// boundaries.
pub fn highlight<'a>(text: &'a str, query: &str) -> Highlight<'a> {
    let query = query.trim();
    if query.is_empty() {
        return Highlight::unmatched(text);
    }
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();

    for (start, _) in text.char_indices() {
        if let Some(len) = match_len(&text[start..], &needle) {
            let end = start + len;
            return Highlight {
                before: &text[..start],
                matched: &text[start..end],
                after: &text[end..],
            };
        }
    }
    Highlight::unmatched(text)
}

/// Byte length of the prefix of `haystack` whose lowercase form equals `needle`.
fn match_len(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in haystack.char_indices() {
        if matched == needle.len() {
            return Some(offset);
        }
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
    }
    (matched == needle.len()).then_some(haystack.len())
}
