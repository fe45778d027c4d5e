//! Property tests for quoting and invoice issue through the API types

use axum::http::StatusCode;
use axum::response::IntoResponse;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::Currency;
use domain_invoicing::{
    sanitize_registration_number, InvoiceRenderer, PaymentStatus, PdfBackend,
    StandardInvoiceRenderer,
};
use domain_pricing::{DelegateCategory, LineItemKind, PricingEngine};
use interface_api::dto::pricing::QuoteResponse;
use interface_api::error::ApiError;
use test_utils::*;

// ============================================================================
// Fixed scenarios
// ============================================================================

#[test]
fn test_builder_scenarios_price_as_listed() {
    let engine = PricingEngine::standard();

    let private = engine
        .compute(&TestRegistrationBuilder::new().build())
        .unwrap();
    assert_money_eq(&private.total_amount(), MoneyFixtures::zmw_7000().amount(), Currency::ZMW);
    assert_line_kinds(&private, &[LineItemKind::Base]);

    let public_gala = engine
        .compute(
            &TestRegistrationBuilder::category(DelegateCategory::PublicSector)
                .with_victoria_falls()
                .with_dinner_gala()
                .build(),
        )
        .unwrap();
    assert_invoice_total(&public_gala, dec!(10500), Currency::ZMW);
    assert_eq!(public_gala.dinner_gala_price(), Some(MoneyFixtures::zmw_1500()));

    let international = engine
        .compute(
            &TestRegistrationBuilder::category(DelegateCategory::International)
                .with_accommodation()
                .with_boat_cruise()
                .with_dinner_gala()
                .build(),
        )
        .unwrap();
    assert_eq!(international.base_price(), MoneyFixtures::usd_650());
    assert_invoice_total(&international, dec!(1550), Currency::USD);
    assert_line_kinds(
        &international,
        &[
            LineItemKind::Base,
            LineItemKind::Accommodation,
            LineItemKind::Excursions,
            LineItemKind::DinnerGala,
        ],
    );
}

#[test]
fn test_pricing_table_fixture_matches_built_in_list() {
    let schedule = domain_pricing::PricingSchedule::from_json(&PricingTableFixtures::standard_json()).unwrap();
    assert_eq!(schedule, domain_pricing::PricingSchedule::standard());
}

#[test]
fn test_complete_metadata_renders_to_fixture_filename() {
    let renderer = StandardInvoiceRenderer::new(PdfBackend::new(), TemporalFixtures::fixed_clock());
    let invoice = PricingEngine::standard()
        .compute(&TestRegistrationBuilder::new().with_boat_cruise().build())
        .unwrap();

    let rendered = renderer.render(&invoice, &MetadataFixtures::complete()).unwrap();

    assert_eq!(rendered.filename, StringFixtures::invoice_filename());
    assert_pdf_document(&rendered.bytes);
}

#[test]
fn test_overlong_participant_details_are_shortened_on_the_page() {
    let organization = "Copperbelt Energy Corporation Procurement Directorate ".repeat(4);
    let metadata = TestMetadataBuilder::new()
        .with_venue(StringFixtures::venue())
        .with_organization(organization.trim())
        .with_payment_status(PaymentStatus::Paid)
        .build();
    let renderer = StandardInvoiceRenderer::new(PdfBackend::new(), TemporalFixtures::fixed_clock());
    let invoice = PricingEngine::standard()
        .compute(&TestRegistrationBuilder::new().build())
        .unwrap();

    let rendered = renderer.render(&invoice, &metadata).unwrap();
    let content = String::from_utf8_lossy(&rendered.bytes);

    assert_pdf_document(&rendered.bytes);
    assert!(content.contains("(Payment status: Paid) Tj"));
    assert!(content.contains("(Organization: Copperbelt Energy Corporation"));
    assert!(!content.contains(organization.trim()));
    assert!(content.contains("...) Tj"));
}

#[test]
fn test_late_evening_generation_uses_next_local_day() {
    let renderer = StandardInvoiceRenderer::new(
        PdfBackend::new(),
        core_kernel::FixedClock(TemporalFixtures::late_evening_utc()),
    );
    let invoice = PricingEngine::standard()
        .compute(&TestRegistrationBuilder::new().build())
        .unwrap();
    let metadata = TestMetadataBuilder::new()
        .with_registration_number("REG-1")
        .build();

    let rendered = renderer.render(&invoice, &metadata).unwrap();
    assert_invoice_filename(&rendered.filename, "REG-1", TemporalFixtures::issue_date());
}

#[test]
fn test_blank_metadata_maps_to_unprocessable() {
    let renderer = StandardInvoiceRenderer::new(PdfBackend::new(), TemporalFixtures::fixed_clock());
    let invoice = PricingEngine::standard()
        .compute(&TestRegistrationBuilder::new().build())
        .unwrap();
    let metadata = TestMetadataBuilder::new().with_event_title(" ").build();

    let error: ApiError = renderer.render(&invoice, &metadata).unwrap_err().into();
    assert_eq!(error.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn quotes_balance_for_every_form(form in registration_form_strategy()) {
        let invoice = PricingEngine::standard().quote(form).unwrap();
        assert_line_items_balance(&invoice);

        let response = QuoteResponse::from(&invoice);
        let sum: rust_decimal::Decimal = response.line_items.iter().map(|item| item.amount).sum();
        prop_assert_eq!(sum, response.total_amount);
    }

    #[test]
    fn aliases_resolve_to_their_category((raw, category) in delegate_type_alias_strategy()) {
        let form = TestRegistrationBuilder::delegate_type(raw).build_form();
        let invoice = PricingEngine::standard().quote(form).unwrap();
        prop_assert_eq!(invoice.category(), category);
    }

    #[test]
    fn unknown_delegate_types_are_unprocessable(raw in unknown_delegate_type_strategy()) {
        let form = TestRegistrationBuilder::delegate_type(raw.clone()).build_form();
        let error: ApiError = PricingEngine::standard().quote(form).unwrap_err().into();

        prop_assert!(matches!(&error, ApiError::InvalidCategory(r) if *r == raw));
        prop_assert_eq!(error.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn strict_and_lenient_agree_on_priceable_selections(selections in selections_strategy()) {
        let lenient = PricingEngine::standard().compute(&selections).unwrap();
        let strict = PricingEngine::standard()
            .with_policy(domain_pricing::SelectionPolicy::Strict)
            .compute(&selections);

        if let Ok(strict) = strict {
            prop_assert_eq!(strict, lenient);
        }
    }

    #[test]
    fn rendered_filenames_are_sanitized(
        metadata in metadata_strategy(),
        selections in selections_strategy(),
    ) {
        let renderer = StandardInvoiceRenderer::new(PdfBackend::new(), TemporalFixtures::fixed_clock());
        let invoice = PricingEngine::standard().compute(&selections).unwrap();
        let rendered = renderer.render(&invoice, &metadata).unwrap();

        assert_invoice_filename(
            &rendered.filename,
            &sanitize_registration_number(&metadata.registration_number),
            TemporalFixtures::issue_date(),
        );
        assert_pdf_document(&rendered.bytes);
    }
}
