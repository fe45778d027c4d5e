//! Registration selections
//!
//! [`RegistrationForm`] is what the registration wizard submits: strings
//! and checkboxes, collected over several steps. It is turned into a
//! [`RegistrationSelections`] in one go once every step is present, and only
//! the typed value ever reaches the pricing engine.

use serde::{Deserialize, Serialize};

use crate::category::DelegateCategory;
use crate::error::PricingError;

/// Typed, immutable pricing input for one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationSelections {
    pub delegate_category: DelegateCategory,
    /// Only priced for international delegates
    pub accommodation_package: bool,
    pub victoria_falls_package: bool,
    pub boat_cruise_package: bool,
    pub dinner_gala_attendance: bool,
}

impl RegistrationSelections {
    /// Selections with no add-ons
    pub fn base_only(delegate_category: DelegateCategory) -> Self {
        Self {
            delegate_category,
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

    /// True if either excursion was ticked; the two are priced as one upgrade
    pub fn wants_excursions(&self) -> bool {
        self.victoria_falls_package || self.boat_cruise_package
    }
}

/// Registration wizard submission as received from the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    #[serde(alias = "delegateType", alias = "delegate_category")]
    pub delegate_type: String,
    #[serde(default, alias = "accommodationPackage")]
    pub accommodation_package: bool,
    #[serde(default, alias = "victoriaFallsPackage")]
    pub victoria_falls_package: bool,
    #[serde(default, alias = "boatCruisePackage")]
    pub boat_cruise_package: bool,
    #[serde(default, alias = "dinnerGalaAttendance")]
    pub dinner_gala_attendance: bool,
}

impl RegistrationForm {
    /// Validates the form and produces the typed selections
    pub fn into_selections(self) -> Result<RegistrationSelections, PricingError> {
        let delegate_category: DelegateCategory = self.delegate_type.parse()?;

        Ok(RegistrationSelections {
            delegate_category,
            accommodation_package: self.accommodation_package,
            victoria_falls_package: self.victoria_falls_package,
            boat_cruise_package: self.boat_cruise_package,
            dinner_gala_attendance: self.dinner_gala_attendance,
        })
    }
}

impl TryFrom<RegistrationForm> for RegistrationSelections {
    type Error = PricingError;

    fn try_from(form: RegistrationForm) -> Result<Self, Self::Error> {
        form.into_selections()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_accepts_camel_case_fields() {
        let form: RegistrationForm = serde_json::from_str(
            r#"{"delegateType": "private", "boatCruisePackage": true, "dinnerGalaAttendance": true}"#,
        )
        .unwrap();

        let selections = form.into_selections().unwrap();
        assert_eq!(selections.delegate_category, DelegateCategory::PrivateSector);
        assert!(selections.boat_cruise_package);
        assert!(selections.dinner_gala_attendance);
        assert!(!selections.accommodation_package);
        assert!(!selections.victoria_falls_package);
    }

    #[test]
    fn test_form_with_unknown_category_fails() {
        let form = RegistrationForm {
            delegate_type: "student".to_string(),
            ..Default::default()
        };
        assert_eq!(
            RegistrationSelections::try_from(form),
            Err(PricingError::InvalidCategory("student".to_string()))
        );
    }

    #[test]
    fn test_empty_category_fails() {
        let form = RegistrationForm::default();
        assert!(matches!(form.into_selections(), Err(PricingError::InvalidCategory(_))));
    }

    #[test]
    fn test_wants_excursions_is_an_or() {
        let base = RegistrationSelections::base_only(DelegateCategory::PublicSector);
        assert!(!base.wants_excursions());
        assert!(base.with_victoria_falls().wants_excursions());
        assert!(base.with_boat_cruise().wants_excursions());
    }
}
