// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Heading visibility observation.
//!
//! Targets are subscribed with their rendered line. Each [`ViewportObserver::update`] compares
//! the targets against the tracked region of the new viewport and reports transitions in
//! subscription order. Dropping a [`Subscription`] unobserves its target.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::{Rc, Weak};

use crate::model::HeadingId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub scroll_top: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(scroll_top: usize, height: usize) -> Self {
        Self { scroll_top, height }
    }
}

/// Shrinks the viewport to the band a reader is actually looking at.
///
/// `top_rows` skips the rows under the page header; `bottom_percent` of the height is ignored at
/// the bottom. The band is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootMargin {
    pub top_rows: usize,
    pub bottom_percent: u8,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top_rows: 2,
            bottom_percent: 80,
        }
    }
}

impl RootMargin {
    pub fn region(&self, viewport: Viewport) -> Range<usize> {
        let percent = usize::from(self.bottom_percent.min(100));
        let ignored_bottom = viewport.height * percent / 100;
        let start = viewport.scroll_top + self.top_rows;
        let end = (viewport.scroll_top + viewport.height).saturating_sub(ignored_bottom);
        start..end.max(start + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityEntry {
    pub target: HeadingId,
    pub is_intersecting: bool,
}

/// Subscription side of visibility detection.
pub trait VisibilitySource {
    fn subscribe(&self, target: HeadingId, line: usize) -> Subscription;
}

#[derive(Debug)]
struct ObservedTarget {
    token: u64,
    target: HeadingId,
    line: usize,
    intersecting: bool,
}

#[derive(Debug, Default)]
struct Registry {
    next_token: u64,
    targets: Vec<ObservedTarget>,
}

/// Releases its target from the observer when dropped.
#[derive(Debug)]
#[must_use = "dropping a subscription stops observing its target"]
pub struct Subscription {
    token: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .targets
                .retain(|observed| observed.token != self.token);
        }
    }
}

#[derive(Debug, Default)]
pub struct ViewportObserver {
    margin: RootMargin,
    registry: Rc<RefCell<Registry>>,
}

impl ViewportObserver {
    pub fn new(margin: RootMargin) -> Self {
        Self {
            margin,
            registry: Rc::new(RefCell::new(Registry::default())),
        }
    }

    pub fn margin(&self) -> RootMargin {
        self.margin
    }

    pub fn observed_count(&self) -> usize {
        self.registry.borrow().targets.len()
    }

    /// Reports every target whose intersection with the tracked region changed.
    pub fn update(&self, viewport: Viewport) -> Vec<VisibilityEntry> {
        let region = self.margin.region(viewport);
        let mut registry = self.registry.borrow_mut();
        let mut entries = Vec::new();
        for observed in &mut registry.targets {
            let intersecting = region.contains(&observed.line);
            if intersecting != observed.intersecting {
                observed.intersecting = intersecting;
                entries.push(VisibilityEntry {
                    target: observed.target.clone(),
                    is_intersecting: intersecting,
                });
            }
        }
        entries
    }
}

impl VisibilitySource for ViewportObserver {
    fn subscribe(&self, target: HeadingId, line: usize) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let token = registry.next_token;
        registry.next_token = registry.next_token.wrapping_add(1);
        registry.targets.push(ObservedTarget {
            token,
            target,
            line,
            intersecting: false,
        });
        Subscription {
            token,
            registry: Rc::downgrade(&self.registry),
        }
    }
}
