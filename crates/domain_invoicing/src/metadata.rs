//! Display metadata
//!
//! Everything printed on an invoice that does not come from pricing:
//! who registered, for which event, and where the payment stands. These
//! values are opaque display strings taken from the registration record.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::error::InvoiceError;

/// Payment state shown on the invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing paid yet
    Pending,
    /// Payment evidence uploaded, waiting for the secretariat
    UnderReview,
    /// Payment confirmed
    Paid,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Awaiting payment",
            PaymentStatus::UnderReview => "Payment evidence under review",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Participant and event details printed on an invoice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DisplayMetadata {
    #[validate(length(min = 1))]
    pub registration_number: String,
    #[validate(length(min = 1))]
    pub participant_name: String,
    #[validate(length(min = 1))]
    pub event_title: String,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

impl DisplayMetadata {
    pub fn new(
        registration_number: impl Into<String>,
        participant_name: impl Into<String>,
        event_title: impl Into<String>,
    ) -> Self {
        Self {
            registration_number: registration_number.into(),
            participant_name: participant_name.into(),
            event_title: event_title.into(),
            ..Default::default()
        }
    }

    /// Returns a trimmed copy with blank optional fields cleared, or
    /// `RenderingFailed` naming every required field that is blank
    pub fn normalized(&self) -> Result<Self, InvoiceError> {
        let trim_optional = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let normalized = Self {
            registration_number: self.registration_number.trim().to_string(),
            participant_name: self.participant_name.trim().to_string(),
            event_title: self.event_title.trim().to_string(),
            event_date: trim_optional(&self.event_date),
            venue: trim_optional(&self.venue),
            organization: trim_optional(&self.organization),
            position: trim_optional(&self.position),
            country: trim_optional(&self.country),
            email: trim_optional(&self.email),
            payment_status: self.payment_status,
        };

        normalized.validate().map_err(|errors| {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect();
            fields.sort();
            InvoiceError::rendering_failed(format!(
                "missing required invoice field(s): {}",
                fields.join(", ")
            ))
        })?;

        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_metadata_is_accepted() {
        let metadata = DisplayMetadata::new("REG-0042", "Mwila Banda", "Annual Mining Indaba");
        assert!(metadata.normalized().is_ok());
    }

    #[test]
    fn test_blank_required_fields_are_named() {
        let metadata = DisplayMetadata::new("REG-0042", "   ", "");
        match metadata.normalized() {
            Err(InvoiceError::RenderingFailed(message)) => {
                assert_eq!(
                    message,
                    "missing required invoice field(s): event_title, participant_name"
                );
            }
            other => panic!("expected RenderingFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_optionals_are_cleared() {
        let mut metadata = DisplayMetadata::new("REG-1", " Chanda ", "Summit");
        metadata.organization = Some("   ".to_string());
        metadata.country = Some(" Zambia ".to_string());

        let normalized = metadata.normalized().unwrap();
        assert_eq!(normalized.participant_name, "Chanda");
        assert_eq!(normalized.organization, None);
        assert_eq!(normalized.country.as_deref(), Some("Zambia"));
    }

    #[test]
    fn test_payment_status_serde() {
        let status: PaymentStatus = serde_json::from_str("\"under_review\"").unwrap();
        assert_eq!(status, PaymentStatus::UnderReview);
        assert_eq!(status.to_string(), "Payment evidence under review");
    }
}
