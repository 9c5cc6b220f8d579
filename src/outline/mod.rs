// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Page outline: heading anchors, the "On this page" list, and the active-heading tracker.

mod index;
mod slug;
mod visibility;

use std::time::Duration;

pub use index::{HeadingEntry, HeadingIndex};
pub use slug::slugify;
pub use visibility::{
    RootMargin, Subscription, Viewport, ViewportObserver, VisibilityEntry, VisibilitySource,
};

pub const DEFAULT_HEADING_SETTLE: Duration = Duration::from_millis(100);
