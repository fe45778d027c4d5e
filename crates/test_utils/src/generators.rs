//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use domain_invoicing::DisplayMetadata;
use domain_pricing::{DelegateCategory, RegistrationForm, RegistrationSelections};
use proptest::prelude::*;

/// Strategy for generating delegate categories
pub fn category_strategy() -> impl Strategy<Value = DelegateCategory> {
    prop_oneof![
        Just(DelegateCategory::PrivateSector),
        Just(DelegateCategory::PublicSector),
        Just(DelegateCategory::International),
    ]
}

/// Strategy for generating any combination of package flags
pub fn selections_strategy() -> impl Strategy<Value = RegistrationSelections> {
    (
        category_strategy(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(category, accommodation, falls, cruise, gala)| RegistrationSelections {
            delegate_category: category,
            accommodation_package: accommodation,
            victoria_falls_package: falls,
            boat_cruise_package: cruise,
            dinner_gala_attendance: gala,
        })
}

/// Strategy for spellings of a category a client might send
pub fn delegate_type_alias_strategy() -> impl Strategy<Value = (String, DelegateCategory)> {
    prop_oneof![
        Just(("private_sector", DelegateCategory::PrivateSector)),
        Just(("Private Sector", DelegateCategory::PrivateSector)),
        Just(("private", DelegateCategory::PrivateSector)),
        Just(("public-sector", DelegateCategory::PublicSector)),
        Just(("government", DelegateCategory::PublicSector)),
        Just(("INTERNATIONAL", DelegateCategory::International)),
        Just(("foreign", DelegateCategory::International)),
    ]
    .prop_map(|(raw, category)| (raw.to_string(), category))
}

/// Strategy for delegate type strings that match no category
pub fn unknown_delegate_type_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,12}".prop_filter("must not be a known category", |raw| {
        raw.parse::<DelegateCategory>().is_err()
    })
}

/// Strategy for raw forms over known categories
pub fn registration_form_strategy() -> impl Strategy<Value = RegistrationForm> {
    selections_strategy().prop_map(|selections| RegistrationForm {
        delegate_type: selections.delegate_category.as_str().to_string(),
        accommodation_package: selections.accommodation_package,
        victoria_falls_package: selections.victoria_falls_package,
        boat_cruise_package: selections.boat_cruise_package,
        dinner_gala_attendance: selections.dinner_gala_attendance,
    })
}

/// Strategy for registration numbers, including characters unsafe in filenames
pub fn registration_number_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{2,4}[-/ ]?[0-9]{1,6}"
}

/// Strategy for metadata whose required fields are all present
pub fn metadata_strategy() -> impl Strategy<Value = DisplayMetadata> {
    (
        registration_number_strategy(),
        "[A-Z][a-z]{1,10} [A-Z][a-z]{1,12}",
        "[A-Z][a-zA-Z ]{3,40}[a-z]",
        proptest::option::of("[A-Z][a-zA-Z ]{2,30}[a-z]"),
        proptest::option::of("[A-Z][a-z]{2,20}"),
    )
        .prop_map(|(number, name, title, venue, country)| DisplayMetadata {
            venue,
            country,
            ..DisplayMetadata::new(number, name, title)
        })
}
