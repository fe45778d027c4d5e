//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for registrations, invoices, and time.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{Currency, FixedClock, Money};
use domain_invoicing::{DisplayMetadata, PaymentStatus};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Private sector registration fee
    pub fn zmw_7000() -> Money {
        Money::new(dec!(7000.00), Currency::ZMW)
    }

    /// Domestic dinner gala charge
    pub fn zmw_1500() -> Money {
        Money::new(dec!(1500.00), Currency::ZMW)
    }

    /// International registration fee
    pub fn usd_650() -> Money {
        Money::new(dec!(650.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Mid-morning in Lusaka on 15 August 2024
    pub fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 15, 8, 0, 0).unwrap()
    }

    /// 23:30 UTC on 14 August, already the 15th in Lusaka
    pub fn late_evening_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 14, 23, 30, 0).unwrap()
    }

    /// Local date of [`generated_at`](Self::generated_at)
    pub fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()
    }

    pub fn fixed_clock() -> FixedClock {
        FixedClock(Self::generated_at())
    }
}

/// Fixture for common string values
pub struct StringFixtures;

impl StringFixtures {
    pub fn registration_number() -> &'static str {
        "REG-2024-0042"
    }

    pub fn participant_name() -> &'static str {
        "Mwila Banda"
    }

    pub fn event_title() -> &'static str {
        "Zambia Mining Indaba"
    }

    pub fn event_date() -> &'static str {
        "12-14 November 2024"
    }

    pub fn venue() -> &'static str {
        "Mulungushi International Conference Centre, Lusaka"
    }

    /// Filename the renderer produces for the fixtures above
    pub fn invoice_filename() -> &'static str {
        "Invoice-REG-2024-0042-20240815.pdf"
    }
}

/// Fixture for invoice display metadata
pub struct MetadataFixtures;

impl MetadataFixtures {
    /// Only the required fields
    pub fn minimal() -> DisplayMetadata {
        DisplayMetadata::new(
            StringFixtures::registration_number(),
            StringFixtures::participant_name(),
            StringFixtures::event_title(),
        )
    }

    /// Every field populated
    pub fn complete() -> DisplayMetadata {
        DisplayMetadata {
            event_date: Some(StringFixtures::event_date().to_string()),
            venue: Some(StringFixtures::venue().to_string()),
            organization: Some("Copperbelt Energy Corporation".to_string()),
            position: Some("Procurement Manager".to_string()),
            country: Some("Zambia".to_string()),
            email: Some("mwila.banda@example.com".to_string()),
            payment_status: Some(PaymentStatus::Pending),
            ..Self::minimal()
        }
    }
}

/// Fixture for pricing table files
pub struct PricingTableFixtures;

impl PricingTableFixtures {
    /// The standard price list in file form
    pub fn standard_json() -> String {
        serde_json::json!([
            {"category": "private_sector", "currency": "ZMW", "base": 7000, "with_excursions": 9500, "dinner_gala": 1500},
            {"category": "public_sector", "currency": "ZMW", "base": 6500, "with_excursions": 9000, "dinner_gala": 1500},
            {"category": "international", "currency": "USD", "base": 650,
             "with_accommodation": 1150, "with_accommodation_and_excursions": 1450, "dinner_gala": 100}
        ])
        .to_string()
    }
}
