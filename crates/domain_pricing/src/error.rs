//! Pricing domain errors

use core_kernel::MoneyError;
use thiserror::Error;

/// Errors that can occur while pricing a registration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Delegate category not in the known set
    #[error("Invalid delegate category: {0:?}")]
    InvalidCategory(String),

    /// A combination of selections the engine refuses to price
    #[error("Invalid selections: {0}")]
    InvalidSelections(String),

    /// Pricing table failed an integrity check
    #[error("Pricing configuration error: {0}")]
    Configuration(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl PricingError {
    pub fn invalid_category(raw: impl Into<String>) -> Self {
        PricingError::InvalidCategory(raw.into())
    }

    pub fn invalid_selections(message: impl Into<String>) -> Self {
        PricingError::InvalidSelections(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        PricingError::Configuration(message.into())
    }
}
