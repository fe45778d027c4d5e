//! Invoicing domain errors

use domain_pricing::PricingError;
use thiserror::Error;

/// Errors that can occur while producing an invoice document
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Required display metadata is missing; no document was produced
    #[error("Invoice rendering failed: {0}")]
    RenderingFailed(String),

    /// The document backend could not encode the layout
    #[error("Invoice encoding failed: {0}")]
    Encoding(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl InvoiceError {
    pub fn rendering_failed(message: impl Into<String>) -> Self {
        InvoiceError::RenderingFailed(message.into())
    }
}
