// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Guided flow playback.
//!
//! [`PlaybackController`] owns the `(phase, step, playing)` state and drives timed
//! auto-advance through a deadline that exists only while playing. The UI loop polls it with the
//! current instant after handling input, so a pause pressed in the same iteration always wins
//! over a tick that was already due.

mod autoplay;
mod controller;
mod keys;

pub use autoplay::Autoplay;
pub use controller::{PlaybackController, PlaybackState};
pub use keys::PlayerCommand;

use std::time::Duration;

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(1500);
