// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flightdocs: terminal integration guide for the flight-booking PWA.
//!
//! The guide's pages and navigation catalog are built in. On top sit the guided flow player
//! (`playback`), the "On this page" outline (`outline`), catalog search (`search`), the docs
//! shell (`tui`) and the content query proxy (`proxy`).

pub mod config;
pub mod content;
pub mod logging;
pub mod model;
pub mod outline;
pub mod playback;
pub mod proxy;
pub mod render;
pub mod search;
pub mod tui;
