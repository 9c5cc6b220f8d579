// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keyboard contract of the mounted player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Previous,
    Next,
    TogglePlay,
    /// Zero-based phase picked with the digits `1`-`9`.
    Select(usize),
}

impl PlayerCommand {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let chords = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER;
        if key.modifiers.intersects(chords) {
            return None;
        }
        match key.code {
            KeyCode::Left => Some(Self::Previous),
            KeyCode::Right => Some(Self::Next),
            KeyCode::Char(' ') => Some(Self::TogglePlay),
            KeyCode::Char(digit @ '1'..='9') => Some(Self::Select(digit as usize - '1' as usize)),
            _ => None,
        }
    }
}
