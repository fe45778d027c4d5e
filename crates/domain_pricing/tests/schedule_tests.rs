//! Pricing table loading and integrity checks

use rust_decimal_macros::dec;
use std::sync::Arc;

use domain_pricing::{
    DelegateCategory, PricingEngine, PricingError, PricingSchedule, RegistrationSelections,
};

const VALID_TABLE: &str = r#"[
    {"category": "private_sector", "currency": "ZMW", "base": 8000, "with_excursions": 10000, "dinner_gala": 1200},
    {"category": "public",         "currency": "ZMW", "base": 7500, "with_excursions": 9500,  "dinner_gala": 1200},
    {"category": "international",  "currency": "USD", "base": 700,
     "with_accommodation": 1200, "with_accommodation_and_excursions": 1550, "dinner_gala": 120}
]"#;

fn assert_configuration_error(json: &str, needle: &str) {
    match PricingSchedule::from_json(json) {
        Err(PricingError::Configuration(message)) => {
            assert!(message.contains(needle), "{message:?} does not mention {needle:?}")
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_loads_custom_table() {
    let schedule = PricingSchedule::from_json(VALID_TABLE).unwrap();
    let engine = PricingEngine::new(Arc::new(schedule));

    let invoice = engine
        .compute(
            &RegistrationSelections::base_only(DelegateCategory::International)
                .with_accommodation()
                .with_boat_cruise(),
        )
        .unwrap();

    assert_eq!(invoice.accommodation_price().unwrap().amount(), dec!(500));
    assert_eq!(invoice.excursion_price().unwrap().amount(), dec!(350));
    assert_eq!(invoice.total_amount().amount(), dec!(1550));
}

#[test]
fn test_amounts_may_be_strings() {
    let json = VALID_TABLE.replace("8000", "\"8000.00\"");
    let schedule = PricingSchedule::from_json(&json).unwrap();
    let engine = PricingEngine::new(Arc::new(schedule));

    let invoice = engine
        .compute(&RegistrationSelections::base_only(DelegateCategory::PrivateSector))
        .unwrap();
    assert_eq!(invoice.total_amount().amount(), dec!(8000));
}

#[test]
fn test_missing_row_is_rejected() {
    let json = r#"[
        {"category": "private_sector", "currency": "ZMW", "base": 7000, "with_excursions": 9500, "dinner_gala": 1500},
        {"category": "public_sector",  "currency": "ZMW", "base": 6500, "with_excursions": 9000, "dinner_gala": 1500}
    ]"#;
    assert_configuration_error(json, "Missing pricing row for international");
}

#[test]
fn test_duplicate_row_is_rejected_even_through_alias() {
    let json = r#"[
        {"category": "private_sector", "currency": "ZMW", "base": 7000, "with_excursions": 9500, "dinner_gala": 1500},
        {"category": "private",        "currency": "ZMW", "base": 7100, "with_excursions": 9500, "dinner_gala": 1500}
    ]"#;
    assert_configuration_error(json, "Duplicate pricing row for private_sector");
}

#[test]
fn test_unknown_category_is_rejected() {
    let json = VALID_TABLE.replace("\"public\"", "\"students\"");
    assert_configuration_error(&json, "Unknown category");
}

#[test]
fn test_wrong_tier_family_is_rejected() {
    let json = VALID_TABLE.replace(
        "\"with_excursions\": 10000",
        "\"with_excursions\": 10000, \"with_accommodation\": 12000",
    );
    assert_configuration_error(&json, "has no accommodation tiers");
}

#[test]
fn test_international_missing_tier_is_rejected() {
    let json = VALID_TABLE.replace("\"with_accommodation\": 1200, ", "");
    assert_configuration_error(&json, "missing with_accommodation");
}

#[test]
fn test_decreasing_tier_is_rejected() {
    let json = VALID_TABLE.replace("1550", "1100");
    assert_configuration_error(&json, "is below with_accommodation");
}

#[test]
fn test_negative_amount_is_rejected() {
    let json = VALID_TABLE.replace("\"dinner_gala\": 120}", "\"dinner_gala\": -5}");
    assert_configuration_error(&json, "dinner_gala is negative");
}

#[test]
fn test_sub_minor_unit_amount_is_rejected() {
    let json = VALID_TABLE.replace("\"base\": 8000", "\"base\": \"8000.125\"");
    assert_configuration_error(&json, "private_sector base (8000.125) has more than 2 decimal places");
}

#[test]
fn test_trailing_zeros_do_not_count_as_precision() {
    let json = VALID_TABLE.replace("\"dinner_gala\": 120}", "\"dinner_gala\": \"120.5000\"}");
    let schedule = PricingSchedule::from_json(&json).unwrap();
    let engine = PricingEngine::new(Arc::new(schedule));

    let invoice = engine
        .compute(&RegistrationSelections::base_only(DelegateCategory::International).with_dinner_gala())
        .unwrap();
    assert_eq!(invoice.total_amount().to_invoice_string(), "USD 820.50");
}

#[test]
fn test_overflowing_total_is_rejected() {
    let json = VALID_TABLE
        .replace("\"base\": 8000", "\"base\": \"79228162514264337593543950335\"")
        .replace("\"with_excursions\": 10000", "\"with_excursions\": \"79228162514264337593543950335\"")
        .replace("\"dinner_gala\": 1200}", "\"dinner_gala\": 1}");
    assert_configuration_error(&json, "overflows");
}

#[test]
fn test_largest_representable_total_prices_without_error() {
    let json = VALID_TABLE
        .replace("\"base\": 8000", "\"base\": \"79228162514264337593543950334\"")
        .replace("\"with_excursions\": 10000", "\"with_excursions\": \"79228162514264337593543950334\"")
        .replace("\"dinner_gala\": 1200}", "\"dinner_gala\": 1}");
    let engine = PricingEngine::new(Arc::new(PricingSchedule::from_json(&json).unwrap()));

    let invoice = engine
        .compute(&RegistrationSelections::base_only(DelegateCategory::PrivateSector).with_dinner_gala())
        .unwrap();
    assert_eq!(invoice.total_amount().amount(), rust_decimal::Decimal::MAX);
}

#[test]
fn test_malformed_json_is_rejected() {
    assert_configuration_error("{not json", "Invalid pricing table JSON");
}

#[test]
fn test_zero_delta_tier_is_omitted_from_invoice() {
    let json = VALID_TABLE.replace("\"with_excursions\": 10000", "\"with_excursions\": 8000");
    let engine = PricingEngine::new(Arc::new(PricingSchedule::from_json(&json).unwrap()));

    let invoice = engine
        .compute(&RegistrationSelections::base_only(DelegateCategory::PrivateSector).with_victoria_falls())
        .unwrap();

    assert_eq!(invoice.excursion_price(), None);
    assert_eq!(invoice.line_items().len(), 1);
    assert_eq!(invoice.total_amount().amount(), dec!(8000));
}

#[test]
fn test_load_reports_missing_file() {
    let result = PricingSchedule::load("/nonexistent/pricing.json");
    assert!(matches!(result, Err(PricingError::Configuration(m)) if m.contains("Cannot read")));
}
