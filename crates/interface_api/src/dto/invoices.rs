//! Invoice DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::EventId;
use domain_invoicing::{DisplayMetadata, EmailMessage, PaymentStatus};
use domain_pricing::RegistrationForm;

use crate::catalog::EventRecord;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParticipantDetails {
    #[serde(default)]
    pub name: String,
    pub organization: Option<String>,
    pub position: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceRequest {
    pub form: RegistrationForm,
    pub event_id: EventId,
    pub participant: ParticipantDetails,
    #[serde(default)]
    pub registration_number: String,
    pub payment_status: Option<PaymentStatus>,
}

impl InvoiceRequest {
    /// Merges the participant's details with the event's
    pub fn display_metadata(&self, event: &EventRecord) -> DisplayMetadata {
        DisplayMetadata {
            registration_number: self.registration_number.clone(),
            participant_name: self.participant.name.clone(),
            event_title: event.title.clone(),
            event_date: event.date.clone(),
            venue: event.venue.clone(),
            organization: self.participant.organization.clone(),
            position: self.participant.position.clone(),
            country: self.participant.country.clone(),
            email: self.participant.email.clone(),
            payment_status: self.payment_status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub issued_on: NaiveDate,
    #[serde(flatten)]
    pub message: EmailMessage,
}
