// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scoped keyboard listeners and the page scroll lock.
//!
//! Components install a listener when they mount and keep the returned guard; dropping the
//! guard on unmount releases the listener. The scroll lock works the same way for overlays
//! that suspend page scrolling.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerScope {
    Player,
    FaqBrowser,
    SearchModal,
}

#[derive(Debug, Default)]
struct Registry {
    next_token: u64,
    installed: Vec<(u64, ListenerScope)>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct KeyListeners {
    registry: Rc<RefCell<Registry>>,
}

impl KeyListeners {
    pub(crate) fn install(&self, scope: ListenerScope) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        let token = registry.next_token;
        registry.next_token = registry.next_token.wrapping_add(1);
        registry.installed.push((token, scope));
        ListenerGuard {
            token,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub(crate) fn is_installed(&self, scope: ListenerScope) -> bool {
        self.registry
            .borrow()
            .installed
            .iter()
            .any(|(_, installed)| *installed == scope)
    }

    pub(crate) fn count(&self) -> usize {
        self.registry.borrow().installed.len()
    }
}

#[derive(Debug)]
#[must_use = "dropping the guard uninstalls the listener"]
pub(crate) struct ListenerGuard {
    token: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .installed
                .retain(|(token, _)| *token != self.token);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScrollLock {
    holders: Rc<Cell<usize>>,
}

impl ScrollLock {
    pub(crate) fn lock(&self) -> ScrollLockGuard {
        self.holders.set(self.holders.get() + 1);
        ScrollLockGuard {
            holders: Rc::clone(&self.holders),
        }
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }
}

#[derive(Debug)]
#[must_use = "dropping the guard releases the scroll lock"]
pub(crate) struct ScrollLockGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
    }
}
