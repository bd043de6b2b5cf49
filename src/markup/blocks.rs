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

//! Line-oriented block parser for chat message bodies.

use super::inline::{escape_html, render_inline, to_markdown};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("ORDINAL is a valid regex"));

pub const FENCE: &str = "```";

/// One render unit of a message. Text fields hold escaped markup
/// (see [`super::inline`]); artifact bodies are kept raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBlock {
    Heading { level: u8, text: String },
    ListItem(String),
    Paragraph(String),
    /// A line wrapped in `**...**`; the whole line is emphasised.
    BoldParagraph(String),
    CodeArtifact { language: Option<String>, content: String },
    MarkdownArtifact(String),
}

impl RenderBlock {
    pub fn is_artifact(&self) -> bool {
        matches!(self, Self::CodeArtifact { .. } | Self::MarkdownArtifact(_))
    }

    /// Markdown source that parses back into this block.
    pub fn to_source(&self) -> String {
        match self {
            Self::Heading { level, text } => {
                format!("{} {}", "#".repeat(usize::from(*level)), to_markdown(text))
            }
            Self::ListItem(html) => format!("- {}", to_markdown(html)),
            Self::Paragraph(html) => to_markdown(html),
            Self::BoldParagraph(text) => format!("**{}**", to_markdown(text)),
            Self::CodeArtifact { language, content } => {
                format!("{FENCE}{}\n{content}\n{FENCE}", language.as_deref().unwrap_or(""))
            }
            Self::MarkdownArtifact(content) => format!("{FENCE}markdown\n{content}\n{FENCE}"),
        }
    }
}

/// Language tag of a fence line: the text after the backtick run.
pub fn fence_language(line: &str) -> Option<String> {
    let tag = line.trim().trim_start_matches('`').trim();
    (!tag.is_empty()).then(|| tag.to_owned())
}

pub(crate) fn is_markdown_language(language: Option<&str>) -> bool {
    matches!(language, Some("md" | "markdown"))
}

/// Inner text of a line fully wrapped in `**`, if it is one.
pub(crate) fn bold_line(line: &str) -> Option<&str> {
    if line.len() >= 4 { line.strip_prefix("**")?.strip_suffix("**") } else { None }
}

/// Text after a `- ` bullet or `N. ` ordinal prefix.
pub(crate) fn list_item(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("- ") {
        return Some(rest);
    }
    ORDINAL.find(line).map(|m| &line[m.end()..])
}

/// Parse `text` into render blocks. Pure: the same input always yields the
/// same blocks, and no state survives between calls.
pub fn parse_blocks(text: &str) -> Vec<RenderBlock> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if line.starts_with(FENCE) {
            let language = fence_language(line);
            let start = i;
            // Any fence line closes the region, whatever its tag.
            while i < lines.len() && !lines[i].starts_with(FENCE) {
                i += 1;
            }
            let content = lines[start..i].join("\n");
            if i < lines.len() {
                i += 1;
            }
            if is_markdown_language(language.as_deref()) {
                blocks.push(RenderBlock::MarkdownArtifact(content));
            } else {
                blocks.push(RenderBlock::CodeArtifact { language, content });
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("# ") {
            blocks.push(RenderBlock::Heading { level: 1, text: escape_html(rest) });
        } else if let Some(rest) = line.strip_prefix("## ") {
            blocks.push(RenderBlock::Heading { level: 2, text: escape_html(rest) });
        } else if let Some(rest) = list_item(line) {
            blocks.push(RenderBlock::ListItem(render_inline(rest)));
        } else if let Some(inner) = bold_line(line) {
            blocks.push(RenderBlock::BoldParagraph(escape_html(inner)));
        } else if !line.trim().is_empty() {
            blocks.push(RenderBlock::Paragraph(render_inline(line)));
        }
    }

    blocks
}

/// Serialize blocks back into markdown, one block per line group.
pub fn blocks_to_source(blocks: &[RenderBlock]) -> String {
    blocks.iter().map(RenderBlock::to_source).collect::<Vec<_>>().join("\n")
}
