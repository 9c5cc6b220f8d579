// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use tracing::debug;

use super::slug::slugify;
use super::visibility::{Subscription, VisibilityEntry, VisibilitySource};
use crate::model::{Document, HeadingId, HeadingLevel};

const MAX_SCAN_RETRIES: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    id: HeadingId,
    text: String,
    level: HeadingLevel,
    block: usize,
}

impl HeadingEntry {
    pub fn id(&self) -> &HeadingId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    /// Index of the heading block inside its document.
    pub fn block(&self) -> usize {
        self.block
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingScan {
    due: Instant,
    retries_left: u8,
}

/// "On this page" outline for the current document plus the active-heading pointer.
#[derive(Debug)]
pub struct HeadingIndex {
    settle_delay: Duration,
    pending: Option<PendingScan>,
    entries: Vec<HeadingEntry>,
    active: Option<HeadingId>,
    subscriptions: Vec<Subscription>,
}

impl HeadingIndex {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            settle_delay,
            pending: None,
            entries: Vec::new(),
            active: None,
            subscriptions: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[HeadingEntry] {
        &self.entries
    }

    pub fn active(&self) -> Option<&HeadingId> {
        self.active.as_ref()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_scan_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn time_until_scan(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    /// Drops the current outline and schedules a scan after the settling delay.
    ///
    /// Scheduling again before the scan runs supersedes the earlier request.
    pub fn schedule_rebuild(&mut self, now: Instant) {
        self.clear();
        self.pending = Some(PendingScan {
            due: now + self.settle_delay,
            retries_left: MAX_SCAN_RETRIES,
        });
    }

    /// Releases all observation and forgets the outline.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
        self.entries.clear();
        self.active = None;
        self.pending = None;
    }

    /// Runs a due scan. `None` means the document has not been rendered yet; the outline stays
    /// empty and the scan is retried after another settling delay.
    pub fn poll(&mut self, now: Instant, document: Option<&mut Document>) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if pending.due > now {
            return false;
        }

        match document {
            Some(document) => {
                self.pending = None;
                self.rebuild(document);
                true
            }
            None if pending.retries_left > 0 => {
                debug!(
                    retries_left = pending.retries_left,
                    "document not rendered; retrying scan"
                );
                self.pending = Some(PendingScan {
                    due: now + self.settle_delay,
                    retries_left: pending.retries_left - 1,
                });
                false
            }
            None => {
                debug!("document never rendered; outline left empty");
                self.pending = None;
                false
            }
        }
    }

    /// Collects H2/H3 headings in document order, writing derived anchors back onto headings
    /// that lack one.
    pub fn rebuild(&mut self, document: &mut Document) -> &[HeadingEntry] {
        self.subscriptions.clear();
        self.entries.clear();

        for (block, heading) in document.headings_mut() {
            if !heading.level().is_outline_level() {
                continue;
            }
            let id = match heading.id() {
                Some(id) => id.clone(),
                None => {
                    let id = derive_heading_id(heading.text(), self.entries.len() + 1);
                    heading.set_id(id.clone());
                    id
                }
            };
            self.entries.push(HeadingEntry {
                id,
                text: heading.text().to_owned(),
                level: heading.level(),
                block,
            });
        }

        let active_missing = self
            .active
            .as_ref()
            .is_some_and(|active| !self.entries.iter().any(|entry| &entry.id == active));
        if active_missing {
            self.active = None;
        }

        debug!(headings = self.entries.len(), "rebuilt heading index");
        &self.entries
    }

    /// Subscribes every heading to `source`. `line_of_block` maps a heading's block index to its
    /// rendered line; headings without a line are skipped. An empty outline installs nothing.
    pub fn track_active(
        &mut self,
        source: &impl VisibilitySource,
        line_of_block: impl Fn(usize) -> Option<usize>,
    ) {
        self.subscriptions.clear();
        for entry in &self.entries {
            if let Some(line) = line_of_block(entry.block) {
                let subscription = source.subscribe(entry.id.clone(), line);
                self.subscriptions.push(subscription);
            }
        }
    }

    /// Applies one observation batch. Later entering headings win. Returns whether the active
    /// heading changed.
    pub fn on_visibility(&mut self, batch: &[VisibilityEntry]) -> bool {
        let entered = batch.iter().filter(|entry| entry.is_intersecting).last();
        match entered {
            Some(entry) if self.active.as_ref() != Some(&entry.target) => {
                self.active = Some(entry.target.clone());
                true
            }
            _ => false,
        }
    }
}

fn derive_heading_id(text: &str, position: usize) -> HeadingId {
    let slug = slugify(text);
    let slug = if slug.is_empty() {
        format!("section-{position}")
    } else {
        slug
    };
    // slugify output is non-empty `[a-z0-9-]`, the fallback likewise.
    HeadingId::new(slug).expect("derived heading id is valid")
}
