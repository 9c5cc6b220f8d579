// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Catalog search: flattened navigation entries with case-insensitive substring matching.
//!
//! Also the FAQ filter, which narrows entries by a query and an optional category.

use crate::model::{FaqCategory, FaqItem, NavCatalog};

/// Entries shown before anything is typed.
pub const QUICK_LINK_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchableEntry {
    title: String,
    href: String,
    title_lower: String,
    href_lower: String,
}

impl SearchableEntry {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        let title = title.into();
        let href = href.into();
        let title_lower = title.to_lowercase();
        let href_lower = href.to_lowercase();
        Self {
            title,
            href,
            title_lower,
            href_lower,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    fn matches(&self, needle_lower: &str) -> bool {
        self.title_lower.contains(needle_lower) || self.href_lower.contains(needle_lower)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<SearchableEntry>,
}

impl SearchIndex {
    /// Flattens every section's items, preserving catalog order.
    pub fn flatten(catalog: &NavCatalog) -> Self {
        let entries = catalog
            .items()
            .map(|item| SearchableEntry::new(item.title(), item.href()))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[SearchableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose title or href contains `text`, ignoring case. Blank queries match nothing.
    pub fn query(&self, text: &str) -> Vec<&SearchableEntry> {
        let needle = text.trim();
        if needle.is_empty() {
            return Vec::new();
        }
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.matches(&needle))
            .collect()
    }

    pub fn quick_links(&self) -> &[SearchableEntry] {
        &self.entries[..self.entries.len().min(QUICK_LINK_COUNT)]
    }
}

/// Query and category chip of the FAQ browser. Both must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqFilter {
    query: String,
    category: Option<FaqCategory>,
}

impl FaqFilter {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
    }

    pub fn pop_char(&mut self) -> bool {
        self.query.pop().is_some()
    }

    /// `None` shows every category.
    pub fn category(&self) -> Option<FaqCategory> {
        self.category
    }

    pub fn set_category(&mut self, category: Option<FaqCategory>) {
        self.category = category;
    }

    /// Steps through `All`, then each category in order, wrapping around.
    pub fn cycle_category(&mut self, forward: bool) {
        let chips = std::iter::once(None)
            .chain(FaqCategory::ALL.into_iter().map(Some))
            .collect::<Vec<_>>();
        let current = chips
            .iter()
            .position(|chip| *chip == self.category)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % chips.len()
        } else {
            (current + chips.len() - 1) % chips.len()
        };
        self.category = chips[next];
    }

    /// Case-insensitive substring on question or resolution. An empty query matches all.
    pub fn matches(&self, item: &FaqItem) -> bool {
        let needle = self.query.to_lowercase();
        let text_match = item.question().to_lowercase().contains(&needle)
            || item.resolution().to_lowercase().contains(&needle);
        let category_match = self
            .category
            .map_or(true, |category| item.category() == category);
        text_match && category_match
    }

    pub fn apply<'a>(&self, items: &'a [FaqItem]) -> Vec<&'a FaqItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}
