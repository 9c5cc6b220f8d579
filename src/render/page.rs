// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Block, Document, HeadingLevel};

use super::text::{text_len, truncate_with_ellipsis, wrap_words};

const LIST_BULLET: &str = "• ";
const CODE_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading(HeadingLevel),
    Rule(HeadingLevel),
    Paragraph,
    ListItem,
    Code,
    Blank,
    /// Row `n` of the embedded flow player; drawn by the UI.
    Player(usize),
    /// Row `n` of the embedded FAQ browser; drawn by the UI.
    Faq(usize),
}

/// Rows reserved for the interactive blocks a page may embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmbedRows {
    pub player: usize,
    pub faq: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    pub kind: LineKind,
    pub text: String,
}

impl PageLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A document laid out for a fixed width, with the first line of every block recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    width: usize,
    lines: Vec<PageLine>,
    block_lines: Vec<usize>,
}

impl RenderedPage {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lines(&self) -> &[PageLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn block_line(&self, block: usize) -> Option<usize> {
        self.block_lines.get(block).copied()
    }
}

pub fn render_document(document: &Document, width: usize, embeds: EmbedRows) -> RenderedPage {
    let width = width.max(1);
    let mut lines = Vec::<PageLine>::new();
    let mut block_lines = Vec::with_capacity(document.blocks().len());
    let mut previous: Option<&Block> = None;

    for block in document.blocks() {
        let after_list_item = matches!(previous, Some(Block::ListItem(_)));
        let tight = after_list_item && matches!(block, Block::ListItem(_));
        if previous.is_some() && !tight {
            lines.push(PageLine::new(LineKind::Blank, ""));
        }
        block_lines.push(lines.len());

        match block {
            Block::Heading(heading) => {
                let level = heading.level();
                for line in wrap_words(heading.text(), width) {
                    lines.push(PageLine::new(LineKind::Heading(level), line));
                }
                let rule = match level {
                    HeadingLevel::H1 => Some('═'),
                    HeadingLevel::H2 => Some('─'),
                    HeadingLevel::H3 | HeadingLevel::H4 => None,
                };
                if let Some(ch) = rule {
                    let len = text_len(heading.text()).min(width);
                    lines.push(PageLine::new(
                        LineKind::Rule(level),
                        std::iter::repeat(ch).take(len).collect::<String>(),
                    ));
                }
            }
            Block::Paragraph(text) => {
                for line in wrap_words(text, width) {
                    lines.push(PageLine::new(LineKind::Paragraph, line));
                }
            }
            Block::ListItem(text) => {
                let body_width = width.saturating_sub(LIST_BULLET.chars().count()).max(1);
                for (idx, line) in wrap_words(text, body_width).into_iter().enumerate() {
                    let prefix = if idx == 0 { LIST_BULLET } else { "  " };
                    lines.push(PageLine::new(LineKind::ListItem, format!("{prefix}{line}")));
                }
            }
            Block::Code { body, .. } => {
                let body_width = width.saturating_sub(CODE_INDENT.len()).max(1);
                for line in body.lines() {
                    let line = truncate_with_ellipsis(line, body_width);
                    lines.push(PageLine::new(LineKind::Code, format!("{CODE_INDENT}{line}")));
                }
                if body.is_empty() {
                    lines.push(PageLine::new(LineKind::Code, ""));
                }
            }
            Block::FlowPlayer => {
                let rows = (0..embeds.player).map(|row| PageLine::new(LineKind::Player(row), ""));
                lines.extend(rows);
            }
            Block::FaqBrowser => {
                let rows = (0..embeds.faq).map(|row| PageLine::new(LineKind::Faq(row), ""));
                lines.extend(rows);
            }
        }
        previous = Some(block);
    }

    RenderedPage {
        width,
        lines,
        block_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::{render_document, EmbedRows, LineKind};
    use crate::model::{parse_document, HeadingLevel};

    fn texts(page: &super::RenderedPage) -> Vec<&str> {
        page.lines().iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn lays_out_blocks_with_blank_separators() {
        let doc = parse_document("## Setup\nInstall the bridge.\n- one\n- two\n").expect("parse");
        let page = render_document(&doc, 40, EmbedRows::default());
        assert_eq!(
            texts(&page),
            [
                "Setup",
                "─────",
                "",
                "Install the bridge.",
                "",
                "• one",
                "• two"
            ]
        );
        assert_eq!(page.block_line(0), Some(0));
        assert_eq!(page.block_line(1), Some(3));
        assert_eq!(page.block_line(2), Some(5));
        assert_eq!(page.block_line(3), Some(6));
        assert_eq!(page.block_line(4), None);
    }

    #[test]
    fn reserves_player_rows() {
        let doc = parse_document("## Flow\n{% integration-flow /%}\n## After\n").expect("parse");
        let embeds = EmbedRows { player: 3, faq: 0 };
        let page = render_document(&doc, 40, embeds);
        let player_rows = page
            .lines()
            .iter()
            .filter(|line| matches!(line.kind, LineKind::Player(_)))
            .count();
        assert_eq!(player_rows, 3);
        assert_eq!(page.block_line(2), Some(7));
        assert_eq!(page.lines()[7].kind, LineKind::Heading(HeadingLevel::H2));
    }

    #[test]
    fn reserves_faq_rows_after_intro() {
        let doc = parse_document("Intro\n{% integration-faq /%}\n").expect("parse");
        let embeds = EmbedRows { player: 9, faq: 4 };
        let page = render_document(&doc, 40, embeds);
        let kinds = page.lines().iter().map(|l| l.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [
                LineKind::Paragraph,
                LineKind::Blank,
                LineKind::Faq(0),
                LineKind::Faq(1),
                LineKind::Faq(2),
                LineKind::Faq(3),
            ]
        );
        assert_eq!(page.block_line(1), Some(2));
    }

    #[test]
    fn wraps_paragraphs_and_truncates_code() {
        let source = "alpha beta gamma\n\n```\nlong code line here\n```\n";
        let doc = parse_document(source).expect("parse");
        let page = render_document(&doc, 10, EmbedRows::default());
        assert_eq!(texts(&page), ["alpha beta", "gamma", "", "  long co…"]);
    }
}
