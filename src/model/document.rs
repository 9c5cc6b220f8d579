// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Page documents in a small markdown dialect.
//!
//! Supported lines:
//! - `#`, `##`, `###`, `####` headings, optionally suffixed with an explicit anchor `{#id}`
//! - fenced code blocks (```` ```lang ````)
//! - `- ` list items
//! - `{% integration-flow /%}` which embeds the guided flow player
//! - `{% integration-faq /%}` which embeds the FAQ browser
//!
//! Everything else is folded into paragraphs; blank lines separate paragraphs.

use thiserror::Error;

use super::ids::{HeadingId, IdError};

pub const FLOW_PLAYER_MARKER: &str = "{% integration-flow /%}";
pub const FAQ_BROWSER_MARKER: &str = "{% integration-faq /%}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    fn from_hashes(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            _ => None,
        }
    }

    pub fn depth(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
        }
    }

    /// Subsection levels shown in the page outline.
    pub fn is_outline_level(self) -> bool {
        matches!(self, Self::H2 | Self::H3)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    level: HeadingLevel,
    text: String,
    id: Option<HeadingId>,
}

impl Heading {
    pub fn new(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: HeadingId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn id(&self) -> Option<&HeadingId> {
        self.id.as_ref()
    }

    pub fn set_id(&mut self, id: HeadingId) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(Heading),
    Paragraph(String),
    ListItem(String),
    Code {
        language: Option<String>,
        body: String,
    },
    FlowPlayer,
    FaqBrowser,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn embeds_flow_player(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, Block::FlowPlayer))
    }

    pub fn embeds_faq_browser(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, Block::FaqBrowser))
    }

    /// Index of the first FAQ browser block.
    pub fn faq_browser_block(&self) -> Option<usize> {
        self.blocks
            .iter()
            .position(|block| matches!(block, Block::FaqBrowser))
    }

    /// Heading blocks in document order, paired with their block index.
    pub fn headings(&self) -> impl Iterator<Item = (usize, &Heading)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(idx, block)| match block {
                Block::Heading(heading) => Some((idx, heading)),
                _ => None,
            })
    }

    pub fn headings_mut(&mut self) -> impl Iterator<Item = (usize, &mut Heading)> + '_ {
        self.blocks
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, block)| match block {
                Block::Heading(heading) => Some((idx, heading)),
                _ => None,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("line {line}: invalid heading anchor {anchor:?}: {source}")]
    InvalidAnchor {
        line: usize,
        anchor: String,
        source: IdError,
    },
    #[error("line {line}: unterminated code fence")]
    UnterminatedFence { line: usize },
}

pub fn parse_document(source: &str) -> Result<Document, DocumentError> {
    let mut blocks = Vec::new();
    let mut paragraph = Vec::<&str>::new();
    let mut lines = source.lines().enumerate();

    fn flush(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
        if !paragraph.is_empty() {
            blocks.push(Block::Paragraph(paragraph.join(" ")));
            paragraph.clear();
        }
    }

    while let Some((line_idx, raw)) = lines.next() {
        let line_no = line_idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            flush(&mut paragraph, &mut blocks);
            continue;
        }

        if let Some(lang) = line.strip_prefix("```") {
            flush(&mut paragraph, &mut blocks);
            let language = Some(lang.trim())
                .filter(|lang| !lang.is_empty())
                .map(str::to_owned);
            let mut body = Vec::<&str>::new();
            let mut closed = false;
            for (_, code_line) in lines.by_ref() {
                if code_line.trim_start().starts_with("```") {
                    closed = true;
                    break;
                }
                body.push(code_line);
            }
            if !closed {
                return Err(DocumentError::UnterminatedFence { line: line_no });
            }
            blocks.push(Block::Code {
                language,
                body: body.join("\n"),
            });
            continue;
        }

        if line == FLOW_PLAYER_MARKER {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::FlowPlayer);
            continue;
        }

        if line == FAQ_BROWSER_MARKER {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::FaqBrowser);
            continue;
        }

        if let Some(heading) = parse_heading(line, line_no)? {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading(heading));
            continue;
        }

        if let Some(item) = line.strip_prefix("- ") {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::ListItem(item.trim().to_owned()));
            continue;
        }

        paragraph.push(line);
    }
    flush(&mut paragraph, &mut blocks);

    Ok(Document::new(blocks))
}

fn parse_heading(line: &str, line_no: usize) -> Result<Option<Heading>, DocumentError> {
    let hashes = line.chars().take_while(|ch| *ch == '#').count();
    let Some(level) = HeadingLevel::from_hashes(hashes) else {
        return Ok(None);
    };
    let rest = &line[hashes..];
    if !rest.starts_with(' ') {
        return Ok(None);
    }
    let rest = rest.trim();

    if let Some(open) = rest.rfind("{#") {
        if rest.ends_with('}') {
            let anchor = &rest[open + 2..rest.len() - 1];
            let id = HeadingId::new(anchor).map_err(|source| DocumentError::InvalidAnchor {
                line: line_no,
                anchor: anchor.to_owned(),
                source,
            })?;
            let text = rest[..open].trim_end();
            return Ok(Some(Heading::new(level, text).with_id(id)));
        }
    }

    Ok(Some(Heading::new(level, rest)))
}
