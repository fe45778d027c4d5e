//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use domain_invoicing::{DisplayMetadata, PaymentStatus};
use domain_pricing::{DelegateCategory, RegistrationForm, RegistrationSelections};

use crate::fixtures::MetadataFixtures;

/// Builder for registration selections and the equivalent raw form
pub struct TestRegistrationBuilder {
    delegate_type: String,
    accommodation_package: bool,
    victoria_falls_package: bool,
    boat_cruise_package: bool,
    dinner_gala_attendance: bool,
}

impl Default for TestRegistrationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRegistrationBuilder {
    /// Private sector, no add-ons
    pub fn new() -> Self {
        Self::category(DelegateCategory::PrivateSector)
    }

    pub fn category(category: DelegateCategory) -> Self {
        Self::delegate_type(category.as_str())
    }

    /// Starts from a raw, possibly invalid, delegate type string
    pub fn delegate_type(raw: impl Into<String>) -> Self {
        Self {
            delegate_type: raw.into(),
            accommodation_package: false,
            victoria_falls_package: false,
            boat_cruise_package: false,
            dinner_gala_attendance: false,
        }
    }

    pub fn with_accommodation(mut self) -> Self {
        self.accommodation_package = true;
        self
    }

    pub fn with_victoria_falls(mut self) -> Self {
        self.victoria_falls_package = true;
        self
    }

    pub fn with_boat_cruise(mut self) -> Self {
        self.boat_cruise_package = true;
        self
    }

    pub fn with_dinner_gala(mut self) -> Self {
        self.dinner_gala_attendance = true;
        self
    }

    /// Builds the raw form as the client would submit it
    pub fn build_form(self) -> RegistrationForm {
        RegistrationForm {
            delegate_type: self.delegate_type,
            accommodation_package: self.accommodation_package,
            victoria_falls_package: self.victoria_falls_package,
            boat_cruise_package: self.boat_cruise_package,
            dinner_gala_attendance: self.dinner_gala_attendance,
        }
    }

    /// Builds typed selections
    ///
    /// # Panics
    ///
    /// Panics if the delegate type is not a known category
    pub fn build(self) -> RegistrationSelections {
        self.build_form()
            .into_selections()
            .expect("builder delegate type must be a valid category")
    }
}

/// Builder for invoice display metadata
pub struct TestMetadataBuilder {
    metadata: DisplayMetadata,
}

impl Default for TestMetadataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMetadataBuilder {
    /// Starts from the required fields only
    pub fn new() -> Self {
        Self {
            metadata: MetadataFixtures::minimal(),
        }
    }

    pub fn with_registration_number(mut self, number: impl Into<String>) -> Self {
        self.metadata.registration_number = number.into();
        self
    }

    pub fn with_participant_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.participant_name = name.into();
        self
    }

    pub fn with_event_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.event_title = title.into();
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.metadata.venue = Some(venue.into());
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.metadata.organization = Some(organization.into());
        self
    }

    pub fn with_payment_status(mut self, status: PaymentStatus) -> Self {
        self.metadata.payment_status = Some(status);
        self
    }

    pub fn build(self) -> DisplayMetadata {
        self.metadata
    }
}
