//! Pricing engine
//!
//! Maps a registration's selections to a [`PricedInvoice`].
//!
//! Prices are looked up, not added up. Each category defines combination
//! tiers ("base + excursions", "base + accommodation + excursions") and the
//! add-on lines shown on the invoice are derived by subtracting adjacent
//! tiers:
//!
//! ```text
//! International, accommodation + excursions:
//!   accommodation line = with_accommodation                 - base
//!   excursion line     = with_accommodation_and_excursions  - with_accommodation
//!   base + lines       = with_accommodation_and_excursions
//! ```
//!
//! Only the dinner gala is a plain additive charge.

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use core_kernel::Money;

use crate::error::PricingError;
use crate::invoice::PricedInvoice;
use crate::schedule::{CategoryTable, DomesticTable, InternationalTable, PricingSchedule};
use crate::selections::{RegistrationForm, RegistrationSelections};

/// How the engine treats flags a category cannot price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Ignore unpriceable flags
    #[default]
    Lenient,
    /// Reject unpriceable flags with `InvalidSelections`
    Strict,
}

/// Stateless pricing service over a shared schedule
#[derive(Debug, Clone)]
pub struct PricingEngine {
    schedule: Arc<PricingSchedule>,
    policy: SelectionPolicy,
}

impl PricingEngine {
    pub fn new(schedule: Arc<PricingSchedule>) -> Self {
        Self {
            schedule,
            policy: SelectionPolicy::default(),
        }
    }

    /// Engine over the built-in price list
    pub fn standard() -> Self {
        Self::new(Arc::new(PricingSchedule::standard()))
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn schedule(&self) -> &PricingSchedule {
        &self.schedule
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Prices one registration
    ///
    /// # Errors
    ///
    /// * `InvalidSelections` - under [`SelectionPolicy::Strict`], a flag the
    ///   category has no tier for was set
    /// * `Money` - the table mixes currencies within one category
    #[instrument(skip(self, selections), fields(category = %selections.delegate_category))]
    pub fn compute(&self, selections: &RegistrationSelections) -> Result<PricedInvoice, PricingError> {
        if self.policy == SelectionPolicy::Strict {
            check_priceable(selections)?;
        }

        let invoice = match self.schedule.table(selections.delegate_category) {
            CategoryTable::International(table) => price_international(table, selections)?,
            CategoryTable::Domestic(table) => price_domestic(table, selections)?,
        };

        debug!(
            total = %invoice.total_amount(),
            lines = invoice.line_items().len(),
            "Registration priced"
        );
        Ok(invoice)
    }

    /// Parses a raw form and prices it
    ///
    /// Unknown delegate types fail with `InvalidCategory`.
    pub fn quote(&self, form: RegistrationForm) -> Result<PricedInvoice, PricingError> {
        let selections = form.into_selections()?;
        self.compute(&selections)
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_priceable(selections: &RegistrationSelections) -> Result<(), PricingError> {
    let category = selections.delegate_category;
    if category.is_international() {
        if selections.wants_excursions() && !selections.accommodation_package {
            return Err(PricingError::invalid_selections(
                "international excursions are only sold together with the accommodation package",
            ));
        }
    } else if selections.accommodation_package {
        return Err(PricingError::invalid_selections(format!(
            "no accommodation package is offered to {} delegates",
            category.display_name().to_lowercase()
        )));
    }
    Ok(())
}

fn price_international(
    table: &InternationalTable,
    selections: &RegistrationSelections,
) -> Result<PricedInvoice, PricingError> {
    let base = table.base_price();

    let (accommodation, excursion) = if selections.accommodation_package {
        let accommodation_tier = table.accommodation_tier();
        let accommodation = accommodation_tier.checked_sub(&base)?;

        if selections.wants_excursions() {
            debug!(tier = "with_accommodation_and_excursions", "Resolved pricing tier");
            let combined_tier = table.accommodation_and_excursions_tier();
            let excursion = combined_tier.checked_sub(&accommodation_tier)?;
            (Some(checked_delta("accommodation", accommodation)), Some(checked_delta("excursions", excursion)))
        } else {
            debug!(tier = "with_accommodation", "Resolved pricing tier");
            (Some(checked_delta("accommodation", accommodation)), None)
        }
    } else {
        debug!(tier = "base", "Resolved pricing tier");
        (None, None)
    };

    let dinner_gala = selections.dinner_gala_attendance.then(|| table.dinner_gala_price());
    PricedInvoice::assemble(selections.delegate_category, base, accommodation, excursion, dinner_gala)
        .map_err(PricingError::from)
}

fn price_domestic(
    table: &DomesticTable,
    selections: &RegistrationSelections,
) -> Result<PricedInvoice, PricingError> {
    let base = table.base_price();

    let excursion = if selections.wants_excursions() {
        debug!(tier = "with_excursions", "Resolved pricing tier");
        let excursion = table.excursions_tier().checked_sub(&base)?;
        Some(checked_delta("excursions", excursion))
    } else {
        debug!(tier = "base", "Resolved pricing tier");
        None
    };

    let dinner_gala = selections.dinner_gala_attendance.then(|| table.dinner_gala_price());
    PricedInvoice::assemble(selections.delegate_category, base, None, excursion, dinner_gala)
        .map_err(PricingError::from)
}

/// Passes a derived delta through, warning when it will be left off the invoice
fn checked_delta(line: &'static str, delta: Money) -> Money {
    if !delta.is_positive() {
        warn!(line, delta = %delta, "Selected add-on has no positive price and will be omitted");
    }
    delta
}
