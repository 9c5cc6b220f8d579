// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! The flow catalog (participants, phases, steps), the navigation catalog, page documents and
//! the integration FAQ.

pub mod catalog;
pub mod document;
pub mod faq;
pub mod flow;
pub mod ids;

pub use catalog::{NavCatalog, NavItem, NavSection};
pub use document::{
    parse_document, Block, Document, DocumentError, Heading, HeadingLevel, FAQ_BROWSER_MARKER,
    FLOW_PLAYER_MARKER,
};
pub use faq::{FaqCategory, FaqIdentifier, FaqItem, FaqSeverity};
pub use flow::{FlowModel, ModelError, Participant, Phase, Step, StepKind};
pub use ids::{FaqId, HeadingId, Id, IdError, ParticipantKey, PhaseId};
