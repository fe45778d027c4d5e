//! Delegate categories
//!
//! The category is the registrant's pricing segment. It is the only input
//! that selects a pricing table, so it is parsed exactly once at the edge
//! ([`DelegateCategory::from_str`]) and carried as an enum from there on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PricingError;

/// Pricing segment of a delegate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelegateCategory {
    PrivateSector,
    PublicSector,
    International,
}

impl DelegateCategory {
    pub const ALL: [DelegateCategory; 3] = [
        DelegateCategory::PrivateSector,
        DelegateCategory::PublicSector,
        DelegateCategory::International,
    ];

    /// Canonical machine name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DelegateCategory::PrivateSector => "private_sector",
            DelegateCategory::PublicSector => "public_sector",
            DelegateCategory::International => "international",
        }
    }

    /// Human-readable name for printed documents
    pub fn display_name(&self) -> &'static str {
        match self {
            DelegateCategory::PrivateSector => "Private Sector",
            DelegateCategory::PublicSector => "Public Sector",
            DelegateCategory::International => "International",
        }
    }

    pub fn is_international(&self) -> bool {
        matches!(self, DelegateCategory::International)
    }
}

impl fmt::Display for DelegateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DelegateCategory {
    type Err = PricingError;

    /// Accepts canonical names and the aliases used by registration forms.
    /// Matching ignores case, surrounding whitespace, and whether words are
    /// separated by spaces, dashes or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "private" | "private_sector" | "privatesector" => Ok(DelegateCategory::PrivateSector),
            "public" | "public_sector" | "publicsector" | "government" => {
                Ok(DelegateCategory::PublicSector)
            }
            "international" | "international_delegate" | "foreign" => {
                Ok(DelegateCategory::International)
            }
            _ => Err(PricingError::invalid_category(s)),
        }
    }
}
