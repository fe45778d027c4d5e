//! Priced invoices
//!
//! A [`PricedInvoice`] is the output of one pricing run: the base price,
//! the add-on lines that apply, and the total. It is built once and never
//! modified; the renderer consumes it and it is discarded.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Currency, Money, MoneyError};

use crate::category::DelegateCategory;

/// Kind of charge on an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Base,
    Accommodation,
    Excursions,
    DinnerGala,
}

impl LineItemKind {
    /// Short label for tables and emails
    pub fn label(&self) -> &'static str {
        match self {
            LineItemKind::Base => "Registration fee",
            LineItemKind::Accommodation => "Accommodation package",
            LineItemKind::Excursions => "Victoria Falls & boat cruise excursions",
            LineItemKind::DinnerGala => "Dinner gala",
        }
    }
}

impl fmt::Display for LineItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One priced component of an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub kind: LineItemKind,
    pub description: String,
    pub amount: Money,
}

/// Invoice amounts for one registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedInvoice {
    category: DelegateCategory,
    base_price: Money,
    accommodation_price: Option<Money>,
    excursion_price: Option<Money>,
    dinner_gala_price: Option<Money>,
    currency: Currency,
    total_amount: Money,
}

impl PricedInvoice {
    /// Assembles an invoice from raw line amounts.
    ///
    /// Add-on amounts that are zero or negative are dropped, and the total
    /// is the sum of the remaining lines, floored at zero.
    pub(crate) fn assemble(
        category: DelegateCategory,
        base_price: Money,
        accommodation_price: Option<Money>,
        excursion_price: Option<Money>,
        dinner_gala_price: Option<Money>,
    ) -> Result<Self, MoneyError> {
        let currency = base_price.currency();
        let accommodation_price = accommodation_price.filter(Money::is_positive);
        let excursion_price = excursion_price.filter(Money::is_positive);
        let dinner_gala_price = dinner_gala_price.filter(Money::is_positive);

        let total_amount = Money::sum(
            currency,
            std::iter::once(&base_price)
                .chain(accommodation_price.iter())
                .chain(excursion_price.iter())
                .chain(dinner_gala_price.iter()),
        )?
        .floor_at_zero();

        Ok(Self {
            category,
            base_price,
            accommodation_price,
            excursion_price,
            dinner_gala_price,
            currency,
            total_amount,
        })
    }

    pub fn category(&self) -> DelegateCategory {
        self.category
    }

    pub fn base_price(&self) -> Money {
        self.base_price
    }

    pub fn accommodation_price(&self) -> Option<Money> {
        self.accommodation_price
    }

    pub fn excursion_price(&self) -> Option<Money> {
        self.excursion_price
    }

    pub fn dinner_gala_price(&self) -> Option<Money> {
        self.dinner_gala_price
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Lines in print order; the base line is always first
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut items = vec![LineItem {
            kind: LineItemKind::Base,
            description: format!(
                "{} ({} delegate)",
                LineItemKind::Base.label(),
                self.category.display_name()
            ),
            amount: self.base_price,
        }];

        let add_ons = [
            (LineItemKind::Accommodation, self.accommodation_price),
            (LineItemKind::Excursions, self.excursion_price),
            (LineItemKind::DinnerGala, self.dinner_gala_price),
        ];
        items.extend(add_ons.into_iter().filter_map(|(kind, amount)| {
            amount.map(|amount| LineItem {
                kind,
                description: kind.label().to_string(),
                amount,
            })
        }));

        items
    }
}
