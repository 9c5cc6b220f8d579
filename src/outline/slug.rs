// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Derives an anchor from heading text.
///
/// Lower-cases the text, collapses every run of characters outside `[a-z0-9]` into one `-`,
/// and trims leading/trailing `-`. Returns an empty string when nothing survives.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::slugify;
    use rstest::rstest;

    #[rstest]
    #[case("Overview", "overview")]
    #[case("Details", "details")]
    #[case("Payment & Refunds", "payment-refunds")]
    #[case("  GET /user/profile  ", "get-user-profile")]
    #[case("eventLogin()", "eventlogin")]
    #[case("--Already--Dashed--", "already-dashed")]
    #[case("Café au lait", "caf-au-lait")]
    #[case("!!!", "")]
    fn derives_anchor(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(slugify(text), expected);
    }

    #[test]
    fn is_idempotent_on_its_output() {
        let once = slugify("Step 3: Verify status (poll)");
        assert_eq!(slugify(&once), once);
    }
}
