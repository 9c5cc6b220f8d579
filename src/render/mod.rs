// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plain-text layout for pages and flow lanes.
//!
//! Renderers produce owned text lines tagged with what they show, so the TUI can style them
//! without re-parsing and the outline can map headings to rendered lines.

pub mod flow;
pub mod page;
mod text;

pub use flow::{lane_width_for, legend, render_phase_lanes, stroke, FlowLine, FlowLineKind};
pub use page::{render_document, EmbedRows, LineKind, PageLine, RenderedPage};
pub use text::{text_len, truncate_with_ellipsis, wrap_words};
