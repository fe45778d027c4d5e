//! Pricing tables
//!
//! One table per delegate category. Tiers are *combination* prices: the
//! "with excursions" tier is the full price of base plus excursions, not a
//! delta. Domestic categories (private and public sector) share one shape;
//! the international table has an accommodation axis instead.
//!
//! A schedule is loaded once, checked for integrity, and then shared
//! read-only for the life of the process.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use core_kernel::{Currency, Money};

use crate::category::DelegateCategory;
use crate::error::PricingError;

/// Table for private and public sector delegates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomesticTable {
    pub currency: Currency,
    /// Registration without add-ons
    pub base: Decimal,
    /// Registration with the Victoria Falls / boat cruise excursions
    pub with_excursions: Decimal,
    /// Flat dinner gala price, added on top of any tier
    pub dinner_gala: Decimal,
}

/// Table for international delegates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternationalTable {
    pub currency: Currency,
    /// Registration without add-ons
    pub base: Decimal,
    /// Registration with the accommodation package
    pub with_accommodation: Decimal,
    /// Registration with accommodation and excursions
    pub with_accommodation_and_excursions: Decimal,
    /// Flat dinner gala price, added on top of any tier
    pub dinner_gala: Decimal,
}

impl DomesticTable {
    pub fn base_price(&self) -> Money {
        Money::new(self.base, self.currency)
    }

    pub fn excursions_tier(&self) -> Money {
        Money::new(self.with_excursions, self.currency)
    }

    pub fn dinner_gala_price(&self) -> Money {
        Money::new(self.dinner_gala, self.currency)
    }
}

impl InternationalTable {
    pub fn base_price(&self) -> Money {
        Money::new(self.base, self.currency)
    }

    pub fn accommodation_tier(&self) -> Money {
        Money::new(self.with_accommodation, self.currency)
    }

    pub fn accommodation_and_excursions_tier(&self) -> Money {
        Money::new(self.with_accommodation_and_excursions, self.currency)
    }

    pub fn dinner_gala_price(&self) -> Money {
        Money::new(self.dinner_gala, self.currency)
    }
}

/// Borrowed view of the table for one category
#[derive(Debug, Clone, Copy)]
pub enum CategoryTable<'a> {
    Domestic(&'a DomesticTable),
    International(&'a InternationalTable),
}

impl CategoryTable<'_> {
    pub fn currency(&self) -> Currency {
        match self {
            CategoryTable::Domestic(t) => t.currency,
            CategoryTable::International(t) => t.currency,
        }
    }
}

/// Flat, serializable form of one table, as stored in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingRow {
    pub category: String,
    pub currency: Currency,
    pub base: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_excursions: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_accommodation: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_accommodation_and_excursions: Option<Decimal>,
    pub dinner_gala: Decimal,
}

/// The complete set of pricing tables, exactly one per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingSchedule {
    private_sector: DomesticTable,
    public_sector: DomesticTable,
    international: InternationalTable,
}

impl PricingSchedule {
    /// Builds a schedule from typed tables, checking tier integrity
    pub fn new(
        private_sector: DomesticTable,
        public_sector: DomesticTable,
        international: InternationalTable,
    ) -> Result<Self, PricingError> {
        validate_domestic(DelegateCategory::PrivateSector, &private_sector)?;
        validate_domestic(DelegateCategory::PublicSector, &public_sector)?;
        validate_international(&international)?;

        Ok(Self {
            private_sector,
            public_sector,
            international,
        })
    }

    /// The built-in conference price list
    pub fn standard() -> Self {
        Self {
            private_sector: DomesticTable {
                currency: Currency::ZMW,
                base: dec!(7000),
                with_excursions: dec!(9500),
                dinner_gala: dec!(1500),
            },
            public_sector: DomesticTable {
                currency: Currency::ZMW,
                base: dec!(6500),
                with_excursions: dec!(9000),
                dinner_gala: dec!(1500),
            },
            international: InternationalTable {
                currency: Currency::USD,
                base: dec!(650),
                with_accommodation: dec!(1150),
                with_accommodation_and_excursions: dec!(1450),
                dinner_gala: dec!(100),
            },
        }
    }

    /// Resolves the table for `category`
    pub fn table(&self, category: DelegateCategory) -> CategoryTable<'_> {
        match category {
            DelegateCategory::PrivateSector => CategoryTable::Domestic(&self.private_sector),
            DelegateCategory::PublicSector => CategoryTable::Domestic(&self.public_sector),
            DelegateCategory::International => CategoryTable::International(&self.international),
        }
    }

    /// Parses a JSON array of [`PricingRow`]s
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        let rows: Vec<PricingRow> = serde_json::from_str(json)
            .map_err(|e| PricingError::configuration(format!("Invalid pricing table JSON: {}", e)))?;
        Self::from_rows(rows)
    }

    /// Reads and parses a pricing table file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PricingError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            PricingError::configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Assembles a schedule from rows; every category must appear exactly once
    pub fn from_rows(rows: Vec<PricingRow>) -> Result<Self, PricingError> {
        let mut by_category: BTreeMap<DelegateCategory, PricingRow> = BTreeMap::new();

        for row in rows {
            let category: DelegateCategory = row.category.parse().map_err(|_| {
                PricingError::configuration(format!("Unknown category in pricing table: {:?}", row.category))
            })?;
            if by_category.insert(category, row).is_some() {
                return Err(PricingError::configuration(format!(
                    "Duplicate pricing row for {}",
                    category
                )));
            }
        }

        let mut take = |category: DelegateCategory| {
            by_category.remove(&category).ok_or_else(|| {
                PricingError::configuration(format!("Missing pricing row for {}", category))
            })
        };

        let private_sector = domestic_from_row(DelegateCategory::PrivateSector, take(DelegateCategory::PrivateSector)?)?;
        let public_sector = domestic_from_row(DelegateCategory::PublicSector, take(DelegateCategory::PublicSector)?)?;
        let international = international_from_row(take(DelegateCategory::International)?)?;

        Self::new(private_sector, public_sector, international)
    }

    /// Flattens the schedule back into rows, in category order
    pub fn rows(&self) -> Vec<PricingRow> {
        DelegateCategory::ALL
            .iter()
            .map(|category| match self.table(*category) {
                CategoryTable::Domestic(t) => PricingRow {
                    category: category.as_str().to_string(),
                    currency: t.currency,
                    base: t.base,
                    with_excursions: Some(t.with_excursions),
                    with_accommodation: None,
                    with_accommodation_and_excursions: None,
                    dinner_gala: t.dinner_gala,
                },
                CategoryTable::International(t) => PricingRow {
                    category: category.as_str().to_string(),
                    currency: t.currency,
                    base: t.base,
                    with_excursions: None,
                    with_accommodation: Some(t.with_accommodation),
                    with_accommodation_and_excursions: Some(t.with_accommodation_and_excursions),
                    dinner_gala: t.dinner_gala,
                },
            })
            .collect()
    }
}

impl Default for PricingSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

fn domestic_from_row(category: DelegateCategory, row: PricingRow) -> Result<DomesticTable, PricingError> {
    if row.with_accommodation.is_some() || row.with_accommodation_and_excursions.is_some() {
        return Err(PricingError::configuration(format!(
            "{} has no accommodation tiers",
            category
        )));
    }
    let with_excursions = row.with_excursions.ok_or_else(|| {
        PricingError::configuration(format!("{} is missing with_excursions", category))
    })?;

    Ok(DomesticTable {
        currency: row.currency,
        base: row.base,
        with_excursions,
        dinner_gala: row.dinner_gala,
    })
}

fn international_from_row(row: PricingRow) -> Result<InternationalTable, PricingError> {
    let category = DelegateCategory::International;
    if row.with_excursions.is_some() {
        return Err(PricingError::configuration(format!(
            "{} prices excursions through with_accommodation_and_excursions",
            category
        )));
    }
    let missing = |field: &str| PricingError::configuration(format!("{} is missing {}", category, field));

    Ok(InternationalTable {
        currency: row.currency,
        base: row.base,
        with_accommodation: row.with_accommodation.ok_or_else(|| missing("with_accommodation"))?,
        with_accommodation_and_excursions: row
            .with_accommodation_and_excursions
            .ok_or_else(|| missing("with_accommodation_and_excursions"))?,
        dinner_gala: row.dinner_gala,
    })
}

fn ensure_amount(
    category: DelegateCategory,
    currency: Currency,
    field: &str,
    value: Decimal,
) -> Result<(), PricingError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PricingError::configuration(format!(
            "{} {} is negative ({})",
            category, field, value
        )));
    }
    if !Money::fits_currency_precision(value, currency) {
        return Err(PricingError::configuration(format!(
            "{} {} ({}) has more than {} decimal places for {}",
            category,
            field,
            value,
            currency.decimal_places(),
            currency
        )));
    }
    Ok(())
}

fn ensure_not_below(
    category: DelegateCategory,
    tier: &str,
    tier_value: Decimal,
    floor: &str,
    floor_value: Decimal,
) -> Result<(), PricingError> {
    if tier_value < floor_value {
        return Err(PricingError::configuration(format!(
            "{} {} ({}) is below {} ({})",
            category, tier, tier_value, floor, floor_value
        )));
    }
    Ok(())
}

/// The dearest registration (top tier plus gala) must be representable
fn ensure_total_fits(
    category: DelegateCategory,
    top_tier: Decimal,
    dinner_gala: Decimal,
) -> Result<(), PricingError> {
    top_tier.checked_add(dinner_gala).map(|_| ()).ok_or_else(|| {
        PricingError::configuration(format!(
            "{} top tier ({}) plus dinner_gala ({}) overflows",
            category, top_tier, dinner_gala
        ))
    })
}

fn validate_domestic(category: DelegateCategory, table: &DomesticTable) -> Result<(), PricingError> {
    for (field, value) in [
        ("base", table.base),
        ("with_excursions", table.with_excursions),
        ("dinner_gala", table.dinner_gala),
    ] {
        ensure_amount(category, table.currency, field, value)?;
    }
    ensure_not_below(category, "with_excursions", table.with_excursions, "base", table.base)?;
    ensure_total_fits(category, table.with_excursions, table.dinner_gala)
}

fn validate_international(table: &InternationalTable) -> Result<(), PricingError> {
    let category = DelegateCategory::International;
    for (field, value) in [
        ("base", table.base),
        ("with_accommodation", table.with_accommodation),
        ("with_accommodation_and_excursions", table.with_accommodation_and_excursions),
        ("dinner_gala", table.dinner_gala),
    ] {
        ensure_amount(category, table.currency, field, value)?;
    }
    ensure_not_below(category, "with_accommodation", table.with_accommodation, "base", table.base)?;
    ensure_not_below(
        category,
        "with_accommodation_and_excursions",
        table.with_accommodation_and_excursions,
        "with_accommodation",
        table.with_accommodation,
    )?;
    ensure_total_fits(category, table.with_accommodation_and_excursions, table.dinner_gala)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schedule_passes_validation() {
        let standard = PricingSchedule::standard();
        let rebuilt = PricingSchedule::new(
            standard.private_sector.clone(),
            standard.public_sector.clone(),
            standard.international.clone(),
        )
        .unwrap();
        assert_eq!(rebuilt, standard);
    }

    #[test]
    fn test_table_branches_by_family() {
        let schedule = PricingSchedule::standard();
        assert!(matches!(schedule.table(DelegateCategory::PrivateSector), CategoryTable::Domestic(_)));
        assert!(matches!(schedule.table(DelegateCategory::PublicSector), CategoryTable::Domestic(_)));
        assert!(matches!(
            schedule.table(DelegateCategory::International),
            CategoryTable::International(_)
        ));
    }

    #[test]
    fn test_rows_round_trip() {
        let schedule = PricingSchedule::standard();
        let rebuilt = PricingSchedule::from_rows(schedule.rows()).unwrap();
        assert_eq!(rebuilt, schedule);
    }

    #[test]
    fn test_equal_tiers_are_allowed() {
        let mut table = PricingSchedule::standard().private_sector;
        table.with_excursions = table.base;
        assert!(validate_domestic(DelegateCategory::PrivateSector, &table).is_ok());
    }
}
