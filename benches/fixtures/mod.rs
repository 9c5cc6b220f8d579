// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::fmt::Write as _;

use flightdocs::model::{parse_document, Document, NavCatalog, NavItem, NavSection};

const WORDS: &[&str] = &[
    "booking", "payment", "refund", "token", "bridge", "webhook", "profile", "session", "order",
    "gateway", "callback", "event", "flight", "status", "native",
];

fn word(seed: usize) -> &'static str {
    WORDS[seed % WORDS.len()]
}

/// `sections * items` catalog entries with titles drawn from a fixed vocabulary.
pub fn catalog(sections: usize, items: usize) -> NavCatalog {
    NavCatalog::new(
        (0..sections)
            .map(|section| {
                let entries = (0..items)
                    .map(|item| {
                        let seed = section * items + item;
                        let title = format!("{} {} {seed}", word(seed), word(seed / 3 + 7));
                        let href = format!("/docs/section-{section}/{}-{item}", word(seed + 1));
                        NavItem::new(title, href)
                    })
                    .collect();
                NavSection::new(format!("Section {section}"), entries)
            })
            .collect(),
    )
}

/// A page with `sections` H2 headings, each followed by prose, a list and an H3.
pub fn document(sections: usize) -> Document {
    let mut source = String::from("# Synthetic guide\n\nIntro paragraph.\n\n");
    for section in 0..sections {
        let _ = writeln!(
            source,
            "## {} {} {section}\n",
            word(section),
            word(section + 4)
        );
        let _ = writeln!(
            source,
            "The {} {} handles the {} for every {}.\n",
            word(section + 1),
            word(section + 2),
            word(section + 3),
            word(section + 5)
        );
        for item in 0..3 {
            let _ = writeln!(source, "- {} {}", word(section + item), word(item + 9));
        }
        let _ = writeln!(source, "\n### Details {section}\n");
        let _ = writeln!(source, "```json\n{{\"section\": {section}}}\n```\n");
    }
    parse_document(&source).expect("synthetic document parses")
}
