// SPDX-FileCopyrightText: 2026 The Flightdocs Authors
// SPDX-License-Identifier: LicenseRef-Flightdocs-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flightdocs and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in guide content: the integration flow, the FAQ entries, the sidebar catalog and the
//! page sources.

use thiserror::Error;

use crate::model::{
    parse_document, Document, DocumentError, FaqCategory, FaqId, FaqItem, FaqSeverity, FlowModel,
    IdError, ModelError, NavCatalog, NavItem, NavSection, Participant, ParticipantKey, Phase,
    PhaseId, Step, StepKind,
};

pub const OVERVIEW_HREF: &str = "/docs/introduction/high-level-overview";
pub const FAQ_HREF: &str = "/docs/support/faqs";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid built-in id: {0}")]
    Id(#[from] IdError),
    #[error("invalid built-in flow: {0}")]
    Model(#[from] ModelError),
    #[error("cannot parse page {href}: {source}")]
    Page { href: String, source: DocumentError },
    #[error("no page for {href}")]
    MissingPage { href: String },
}

/// Pages live under `content/` at their href minus the `/docs/` prefix.
macro_rules! page {
    ($path:literal) => {
        (
            concat!("/docs/", $path),
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/content/", $path, ".md")),
        )
    };
}

const PAGES: &[(&str, &str)] = &[
    page!("introduction/overview"),
    page!("introduction/high-level-overview"),
    page!("introduction/product-integration"),
    page!("integration/pre-requisites"),
    page!("integration/authentication"),
    page!("integration/user-profile"),
    page!("integration/payments"),
    page!("integration/events"),
    page!("integration/webhooks"),
    page!("integration/api-reference"),
    page!("integration/edge-cases"),
    page!("samples/flutter"),
    page!("samples/react-native"),
    page!("samples/android-swift"),
    page!("support/faqs"),
    page!("support/refunds"),
];

pub fn nav_catalog() -> NavCatalog {
    fn section(title: &str, items: &[(&str, &str)]) -> NavSection {
        NavSection::new(
            title,
            items
                .iter()
                .map(|(title, href)| NavItem::new(*title, *href))
                .collect(),
        )
    }

    NavCatalog::new(vec![
        section(
            "Getting Started",
            &[
                ("Overview", "/docs/introduction/overview"),
                ("High Level Overview", OVERVIEW_HREF),
                (
                    "Product & Integration",
                    "/docs/introduction/product-integration",
                ),
            ],
        ),
        section(
            "Integration Guides",
            &[
                ("Pre-Requisites", "/docs/integration/pre-requisites"),
                ("Authentication Flow", "/docs/integration/authentication"),
                ("User Profile API", "/docs/integration/user-profile"),
                ("Payment & Refunds", "/docs/integration/payments"),
                ("JS Bridge Events", "/docs/integration/events"),
                ("Webhooks", "/docs/integration/webhooks"),
                ("API Reference", "/docs/integration/api-reference"),
                ("Edge Cases", "/docs/integration/edge-cases"),
            ],
        ),
        section(
            "Sample Code",
            &[
                ("Flutter", "/docs/samples/flutter"),
                ("React Native", "/docs/samples/react-native"),
                ("Android / Swift", "/docs/samples/android-swift"),
            ],
        ),
        section(
            "Support",
            &[
                ("FAQs", FAQ_HREF),
                ("Refund Scenarios", "/docs/support/refunds"),
            ],
        ),
    ])
}

pub fn page_source(href: &str) -> Option<&'static str> {
    PAGES
        .iter()
        .find(|(page_href, _)| *page_href == href)
        .map(|(_, source)| *source)
}

/// Parses the page at `href` into a fresh document.
pub fn load_page(href: &str) -> Result<Document, ContentError> {
    let source = page_source(href).ok_or_else(|| ContentError::MissingPage {
        href: href.to_owned(),
    })?;
    parse_document(source).map_err(|source| ContentError::Page {
        href: href.to_owned(),
        source,
    })
}

/// The four-phase integration flow walked by the guided player.
pub fn integration_flow() -> Result<FlowModel, ContentError> {
    let native = ParticipantKey::new("native")?;
    let bridge = ParticipantKey::new("bridge")?;
    let pwa = ParticipantKey::new("pwa")?;
    let onarrival = ParticipantKey::new("onarrival")?;
    let partner = ParticipantKey::new("partner")?;

    let participants = vec![
        Participant::new(native.clone(), "Native App", "Native"),
        Participant::new(bridge.clone(), "JS Bridge", "Bridge"),
        Participant::new(pwa.clone(), "PWA", "PWA"),
        Participant::new(onarrival.clone(), "OnArrival", "OA"),
        Participant::new(partner.clone(), "Partner BE", "Partner"),
    ];

    use StepKind::{Callback, Event, Request, Response, Webhook};

    let step = |from: &ParticipantKey, to: &ParticipantKey, label: &str, kind: StepKind| {
        Step::new(from.clone(), to.clone(), label, kind)
    };

    let auth = Phase::new(
        PhaseId::new("auth")?,
        "Authentication",
        "Session & Identity",
        "Establish user identity via JWT validation and fetch profile context through S2S APIs.",
        vec![
            step(&native, &bridge, "eventLogin()", Event)
                .with_description("Request user credentials"),
            step(&bridge, &pwa, "Create Session", Request)
                .with_description("Initialize booking session"),
            step(&pwa, &onarrival, "Validate JWT", Request)
                .with_description("Token verification")
                .with_payload("Authorization: Bearer <JWT>"),
            step(&onarrival, &partner, "GET /user/profile", Request)
                .with_description("Fetch user profile via S2S")
                .with_payload("x-api-key: <API_KEY>"),
            step(&partner, &onarrival, "User Profile", Response),
        ],
    );

    let search = Phase::new(
        PhaseId::new("search")?,
        "Search & Select",
        "Flights & Ancillaries",
        "Multi-supplier aggregation with real-time fare comparison and ancillary selection.",
        vec![
            step(&bridge, &native, "eventLocation()", Event)
                .with_description("Request device context"),
            step(&native, &bridge, "Coordinates", Callback),
            step(&pwa, &onarrival, "Search Flights", Request),
            step(&onarrival, &pwa, "Aggregated Results", Response),
            step(&pwa, &pwa, "Select & Review", Request)
                .with_description("Search, select and review"),
        ],
    );

    let payment = Phase::new(
        PhaseId::new("payment")?,
        "Payment",
        "Gateway Integration",
        "Initialize payment via S2S, trigger native SDK, and verify transaction status.",
        vec![
            step(&pwa, &onarrival, "Init Payment", Request)
                .with_description("User initiates payment"),
            step(&onarrival, &partner, "POST /payment/init", Request)
                .with_description("Initialize payment on partner side")
                .with_payload("{\n  \"amount\": 5500,\n  \"orderId\": \"ORD123\"\n}"),
            step(&partner, &onarrival, "Gateway Meta", Response)
                .with_description("Gateway initialization data"),
            step(&bridge, &native, "eventPaymentGateway()", Event)
                .with_description("Trigger native payment SDK"),
            step(&native, &bridge, "Payment Result", Callback)
                .with_description("Payment result from gateway")
                .with_payload("{\n  \"status\": \"SUCCESS\",\n  \"utr\": \"UTR123\"\n}"),
        ],
    );

    let confirm = Phase::new(
        PhaseId::new("confirm")?,
        "Confirmation",
        "Booking & Delivery",
        "Confirm booking, generate PNR, deliver e-ticket, and trigger lifecycle webhooks.",
        vec![
            step(&onarrival, &partner, "Webhook: PAYMENT_COMPLETED", Webhook),
            step(&onarrival, &pwa, "Booking Confirmed", Response)
                .with_description("On success, generate booking")
                .with_payload("{\n  \"pnr\": \"ABC123\",\n  \"status\": \"CONFIRMED\"\n}"),
            step(&bridge, &native, "eventDownload()", Event)
                .with_description("Download ticket/invoice"),
            step(&onarrival, &partner, "Webhook: BOOKING_CONFIRMED", Webhook),
        ],
    );

    Ok(FlowModel::new(participants, vec![auth, search, payment, confirm])?)
}

/// Troubleshooting entries of the integration FAQ, in display order.
pub fn integration_faqs() -> Result<Vec<FaqItem>, ContentError> {
    use FaqCategory::{Auth, General, Payment, Webhook};
    use FaqSeverity::{Common, Critical, EdgeCase};

    Ok(vec![
        FaqItem::new(
            FaqId::new("auth-url-fail")?,
            "Demo URLs fail when opened in mobile browser",
            Auth,
            Common,
            "Load URL inside mobile webview → Trigger eventLogin → Pass valid user token",
        )
        .with_scenario("Demo or integration URLs fail when opened directly in a mobile browser")
        .with_cause(
            "Demo links are designed to be accessed only from within the client mobile \
             application",
        )
        .with_code(
            "// Correct flow\n\
             1. Load in webview\n\
             2. window.JSBridge.eventLogin({ jwt: \"...\", userId: \"...\" })\n\
             3. Token bypasses guest restrictions",
        ),
        FaqItem::new(
            FaqId::new("flight-not-available")?,
            "Flight service is not available",
            Auth,
            Critical,
            "Ensure: Token generated correctly → Token passed via eventLogin → Token verified by \
             backend",
        )
        .with_cause("Valid authentication token is not being passed to the platform"),
        FaqItem::new(
            FaqId::new("payment-stuck")?,
            "User stuck on Payment Processing screen",
            Payment,
            Critical,
            "Partner verify: Webhook URL config → Payload schema → Signature validation. \
             OnArrival falls back to polling if webhook missing.",
        )
        .with_scenario("User completes payment at PG but PWA shows Payment Processing")
        .with_cause("Backend payment confirmation not received by OnArrival"),
        FaqItem::new(
            FaqId::new("webhook-400")?,
            "Payment webhook returning HTTP 400",
            Webhook,
            Common,
            "Share exact CURL request payload: Full body → Headers → Timestamp → Environment \
             details",
        )
        .with_cause("400 errors indicate payload/schema mismatches"),
        FaqItem::new(
            FaqId::new("retry-amount-different")?,
            "Retry payment showing different amount",
            Payment,
            EdgeCase,
            "Normal behavior. Investigate only if: Amount changes repeatedly within seconds → \
             Pricing differs without retry",
        )
        .with_scenario("User retries payment and amount differs from previous attempt")
        .with_cause(
            "Retry payments validated against latest fare. Amount changes expected if fare \
             refreshed.",
        ),
        FaqItem::new(
            FaqId::new("booking-id")?,
            "When to use Booking ID vs Payment ID?",
            General,
            Common,
            "Booking ID: booking operations. Payment ID: payment status/refunds. Transaction ID: \
             idempotency.",
        )
        .with_identifier("Booking ID", "Primary key for booking operations")
        .with_identifier("Payment ID", "Reference for payment status/refunds")
        .with_identifier("Transaction ID", "Idempotency key (prevents duplicates)"),
    ])
}

#[cfg(test)]
mod tests {
    use super::{
        integration_faqs, integration_flow, load_page, nav_catalog, page_source, FAQ_HREF,
        OVERVIEW_HREF,
    };

    #[test]
    fn builtin_flow_is_valid() {
        let model = integration_flow().expect("builtin flow");
        assert_eq!(model.phase_count(), 4);
        assert_eq!(model.participants().len(), 5);
        let step_counts = model
            .phases()
            .iter()
            .map(|phase| phase.step_count())
            .collect::<Vec<_>>();
        assert_eq!(step_counts, [5, 5, 5, 4]);
    }

    #[test]
    fn every_catalog_entry_has_a_parseable_page() {
        let catalog = nav_catalog();
        for item in catalog.items() {
            assert!(
                page_source(item.href()).is_some(),
                "missing page for {}",
                item.href()
            );
            load_page(item.href())
                .unwrap_or_else(|err| panic!("page {} failed to parse: {err}", item.href()));
        }
    }

    #[test]
    fn overview_page_embeds_the_player() {
        let doc = load_page(OVERVIEW_HREF).expect("overview page");
        assert!(doc.embeds_flow_player());
    }

    #[test]
    fn faq_page_embeds_the_browser() {
        let doc = load_page(FAQ_HREF).expect("faq page");
        assert!(doc.embeds_faq_browser());
        assert!(!doc.embeds_flow_player());
    }

    #[test]
    fn builtin_faqs_have_unique_ids_and_one_code_sample() {
        let faqs = integration_faqs().expect("builtin faqs");
        assert_eq!(faqs.len(), 6);
        let mut ids = faqs
            .iter()
            .map(|item| item.id().as_str())
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
        let with_code = faqs.iter().filter(|item| item.code().is_some()).count();
        assert_eq!(with_code, 1);
    }

    #[test]
    fn catalog_has_sixteen_pages() {
        assert_eq!(nav_catalog().items().count(), 16);
    }
}
