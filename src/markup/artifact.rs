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

use super::blocks::{RenderBlock, bold_line, list_item};
use super::inline::{EmphasisMode, escape_html, render_inline_with};

/// Lines shown in the compact inline preview.
pub const PREVIEW_LINES: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    Code { language: Option<String> },
    Markdown,
}

/// A fenced block pulled out of a message for compact/expanded display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    content: String,
}

/// One display line of an artifact body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLine {
    /// Verbatim code text (never escaped or marked up).
    Code(String),
    Heading { level: u8, html: String },
    ListItem(String),
    Bold(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactView {
    pub lines: Vec<ArtifactLine>,
    /// Body lines not included in `lines`.
    pub hidden_lines: usize,
}

impl ArtifactView {
    pub fn is_truncated(&self) -> bool {
        self.hidden_lines > 0
    }
}

impl Artifact {
    pub fn code(language: Option<String>, content: impl Into<String>) -> Self {
        Self { kind: ArtifactKind::Code { language }, content: content.into() }
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        Self { kind: ArtifactKind::Markdown, content: content.into() }
    }

    pub fn from_block(block: &RenderBlock) -> Option<Self> {
        match block {
            RenderBlock::CodeArtifact { language, content } => {
                Some(Self::code(language.clone(), content.clone()))
            }
            RenderBlock::MarkdownArtifact(content) => Some(Self::markdown(content.clone())),
            _ => None,
        }
    }

    /// Every artifact in `blocks`, in order.
    pub fn collect(blocks: &[RenderBlock]) -> Vec<Self> {
        blocks.iter().filter_map(Self::from_block).collect()
    }

    pub fn title(&self) -> &str {
        match &self.kind {
            ArtifactKind::Code { language } => language.as_deref().unwrap_or("code"),
            ArtifactKind::Markdown => "artifact",
        }
    }

    /// Raw body for the clipboard, exactly as captured from the fence.
    pub fn copy_text(&self) -> &str {
        &self.content
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    pub fn preview(&self) -> ArtifactView {
        self.view(Some(PREVIEW_LINES))
    }

    pub fn expanded(&self) -> ArtifactView {
        self.view(None)
    }

    fn view(&self, limit: Option<usize>) -> ArtifactView {
        let total = self.line_count();
        let shown = limit.map_or(total, |max| total.min(max));
        let lines = self
            .content
            .lines()
            .take(shown)
            .map(|line| match self.kind {
                ArtifactKind::Code { .. } => ArtifactLine::Code(line.to_owned()),
                ArtifactKind::Markdown => markdown_line(line),
            })
            .collect();
        ArtifactView { lines, hidden_lines: total - shown }
    }
}

/// Reduced line rules for markdown bodies. Fences are not expanded here.
fn markdown_line(line: &str) -> ArtifactLine {
    let inline = |text: &str| render_inline_with(text, EmphasisMode::Strict);
    if let Some(rest) = line.strip_prefix("# ") {
        ArtifactLine::Heading { level: 1, html: inline(rest) }
    } else if let Some(rest) = line.strip_prefix("## ") {
        ArtifactLine::Heading { level: 2, html: inline(rest) }
    } else if let Some(rest) = list_item(line) {
        ArtifactLine::ListItem(inline(rest))
    } else if let Some(inner) = bold_line(line) {
        ArtifactLine::Bold(escape_html(inner))
    } else {
        ArtifactLine::Text(inline(line))
    }
}

#[cfg(test)]
mod tests {
    // =====
    // TESTS: 8
    // =====

    use super::*;
    use crate::markup::blocks::parse_blocks;
    use pretty_assertions::assert_eq;

    #[test]
    fn titles_follow_kind_and_language() {
        assert_eq!(Artifact::code(Some("js".to_owned()), "").title(), "js");
        assert_eq!(Artifact::code(None, "").title(), "code");
        assert_eq!(Artifact::markdown("").title(), "artifact");
    }

    #[test]
    fn preview_is_bounded_and_reports_hidden_lines() {
        let body = (1..=20).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
        let artifact = Artifact::code(None, body);
        let preview = artifact.preview();
        assert_eq!(preview.lines.len(), PREVIEW_LINES);
        assert_eq!(preview.hidden_lines, 8);
        assert!(preview.is_truncated());

        let expanded = artifact.expanded();
        assert_eq!(expanded.lines.len(), 20);
        assert!(!expanded.is_truncated());
    }

    #[test]
    fn code_lines_are_verbatim() {
        let artifact = Artifact::code(Some("html".to_owned()), "<b>**x**</b>");
        assert_eq!(artifact.preview().lines, vec![ArtifactLine::Code("<b>**x**</b>".to_owned())]);
    }

    #[test]
    fn copy_text_is_raw_not_escaped() {
        let blocks = parse_blocks("```md\n# A & <B>\n- `x`\n```");
        let artifact = Artifact::from_block(&blocks[0]).unwrap();
        assert_eq!(artifact.copy_text(), "# A & <B>\n- `x`");
    }

    #[test]
    fn markdown_body_uses_line_rules() {
        let artifact = Artifact::markdown(
            "# Quick Notes\n\n- **Topic**: `a*b`\n## Next\n1. Edit\n**Done**\nplain <x>",
        );
        assert_eq!(
            artifact.expanded().lines,
            vec![
                ArtifactLine::Heading { level: 1, html: "Quick Notes".to_owned() },
                ArtifactLine::Text(String::new()),
                ArtifactLine::ListItem("<strong>Topic</strong>: <code>a*b</code>".to_owned()),
                ArtifactLine::Heading { level: 2, html: "Next".to_owned() },
                ArtifactLine::ListItem("Edit".to_owned()),
                ArtifactLine::Bold("Done".to_owned()),
                ArtifactLine::Text("plain &lt;x&gt;".to_owned()),
            ]
        );
    }

    #[test]
    fn fences_inside_markdown_body_stay_text() {
        let artifact = Artifact::markdown("```rust\nfn main() {}");
        assert_eq!(
            artifact.expanded().lines,
            vec![
                ArtifactLine::Text("```rust".to_owned()),
                ArtifactLine::Text("fn main() {}".to_owned()),
            ]
        );
    }

    #[test]
    fn collect_skips_non_artifact_blocks() {
        let blocks = parse_blocks("intro\n```js\n1\n```\nmid\n```md\n# x\n```");
        let artifacts = Artifact::collect(&blocks);
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].title(), "js");
        assert_eq!(artifacts[1].kind, ArtifactKind::Markdown);
    }

    #[test]
    fn empty_body_has_no_lines() {
        let artifact = Artifact::code(None, "");
        assert_eq!(artifact.line_count(), 0);
        assert!(artifact.preview().lines.is_empty());
    }
}
