// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// One navigable page: sidebar title plus its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    title: String,
    href: String,
}

impl NavItem {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn href(&self) -> &str {
        &self.href
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSection {
    title: String,
    items: Vec<NavItem>,
}

impl NavSection {
    pub fn new(title: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }
}

/// The sidebar catalog: ordered sections of ordered pages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavCatalog {
    sections: Vec<NavSection>,
}

impl NavCatalog {
    pub fn new(sections: Vec<NavSection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[NavSection] {
        &self.sections
    }

    /// All items in section-then-item order.
    pub fn items(&self) -> impl Iterator<Item = &NavItem> + '_ {
        self.sections
            .iter()
            .flat_map(|section| section.items().iter())
    }

    pub fn position(&self, href: &str) -> Option<usize> {
        self.items().position(|item| item.href() == href)
    }

    pub fn get(&self, href: &str) -> Option<&NavItem> {
        self.items().find(|item| item.href() == href)
    }

    pub fn previous(&self, href: &str) -> Option<&NavItem> {
        let idx = self.position(href)?;
        let prev = idx.checked_sub(1)?;
        self.items().nth(prev)
    }

    pub fn next(&self, href: &str) -> Option<&NavItem> {
        let idx = self.position(href)?;
        self.items().nth(idx + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{NavCatalog, NavItem, NavSection};

    fn catalog() -> NavCatalog {
        NavCatalog::new(vec![
            NavSection::new(
                "A",
                vec![NavItem::new("One", "/one"), NavItem::new("Two", "/two")],
            ),
            NavSection::new("B", vec![NavItem::new("Three", "/three")]),
        ])
    }

    #[test]
    fn previous_and_next_cross_section_boundaries() {
        let catalog = catalog();
        assert_eq!(catalog.next("/two").map(NavItem::title), Some("Three"));
        assert_eq!(catalog.previous("/three").map(NavItem::title), Some("Two"));
    }

    #[test]
    fn previous_and_next_stop_at_ends() {
        let catalog = catalog();
        assert!(catalog.previous("/one").is_none());
        assert!(catalog.next("/three").is_none());
        assert!(catalog.next("/missing").is_none());
    }
}
