// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::FaqId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaqCategory {
    Auth,
    Payment,
    Webhook,
    General,
}

impl FaqCategory {
    pub const ALL: [FaqCategory; 4] = [Self::Auth, Self::Payment, Self::Webhook, Self::General];

    pub fn label(self) -> &'static str {
        match self {
            Self::Auth => "Authentication",
            Self::Payment => "Payment",
            Self::Webhook => "Webhooks",
            Self::General => "General",
        }
    }
}

impl fmt::Display for FaqCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaqSeverity {
    Critical,
    Common,
    EdgeCase,
}

impl FaqSeverity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Common => "Common",
            Self::EdgeCase => "Edge Case",
        }
    }
}

impl fmt::Display for FaqSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named identifier explained by an FAQ entry (e.g. which id to use for refunds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqIdentifier {
    pub name: String,
    pub value: String,
}

/// One troubleshooting entry of the integration FAQ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItem {
    id: FaqId,
    question: String,
    category: FaqCategory,
    severity: FaqSeverity,
    scenario: Option<String>,
    cause: Option<String>,
    resolution: String,
    code: Option<String>,
    identifiers: Vec<FaqIdentifier>,
}

impl FaqItem {
    pub fn new(
        id: FaqId,
        question: impl Into<String>,
        category: FaqCategory,
        severity: FaqSeverity,
        resolution: impl Into<String>,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            category,
            severity,
            scenario: None,
            cause: None,
            resolution: resolution.into(),
            code: None,
            identifiers: Vec::new(),
        }
    }

    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_identifier(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.identifiers.push(FaqIdentifier {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn id(&self) -> &FaqId {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn category(&self) -> FaqCategory {
        self.category
    }

    pub fn severity(&self) -> FaqSeverity {
        self.severity
    }

    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    pub fn resolution(&self) -> &str {
        &self.resolution
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn identifiers(&self) -> &[FaqIdentifier] {
        &self.identifiers
    }
}

#[cfg(test)]
mod tests {
    use super::{FaqCategory, FaqItem, FaqSeverity};
    use crate::model::FaqId;

    #[test]
    fn builder_keeps_optional_sections() {
        let item = FaqItem::new(
            FaqId::new("webhook-400").expect("faq id"),
            "Payment webhook returning HTTP 400",
            FaqCategory::Webhook,
            FaqSeverity::Common,
            "Share the exact request",
        )
        .with_cause("schema mismatch")
        .with_identifier("Booking ID", "Primary key");

        assert_eq!(item.scenario(), None);
        assert_eq!(item.cause(), Some("schema mismatch"));
        assert_eq!(item.code(), None);
        assert_eq!(item.identifiers().len(), 1);
        assert_eq!(item.identifiers()[0].name, "Booking ID");
    }

    #[test]
    fn labels_match_filter_chips() {
        let labels = FaqCategory::ALL.map(FaqCategory::label);
        assert_eq!(labels, ["Authentication", "Payment", "Webhooks", "General"]);
        assert_eq!(FaqSeverity::EdgeCase.to_string(), "Edge Case");
    }
}
