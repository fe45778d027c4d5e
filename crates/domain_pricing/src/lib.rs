//! Registration Pricing Domain
//!
//! Prices a conference registration from the delegate's category and the
//! add-on packages they ticked.
//!
//! # Pricing model
//!
//! Each [`DelegateCategory`] has one table in the [`PricingSchedule`]:
//! - **Private / public sector** (ZMW): base, and a "with excursions" tier.
//!   Victoria Falls and the boat cruise are sold as one upgrade; ticking
//!   either selects the tier.
//! - **International** (USD): base, "with accommodation", and "with
//!   accommodation and excursions" tiers.
//!
//! The dinner gala is a flat charge on top of any tier. The engine never
//! falls back to a default category: unknown delegate types are rejected.
//!
//! # Example
//!
//! ```rust
//! use domain_pricing::{DelegateCategory, PricingEngine, RegistrationSelections};
//!
//! let engine = PricingEngine::standard();
//! let selections = RegistrationSelections::base_only(DelegateCategory::International)
//!     .with_accommodation()
//!     .with_victoria_falls()
//!     .with_dinner_gala();
//!
//! let invoice = engine.compute(&selections)?;
//! assert_eq!(invoice.line_items().len(), 4);
//! # Ok::<(), domain_pricing::PricingError>(())
//! ```

pub mod category;
pub mod schedule;
pub mod selections;
pub mod engine;
pub mod invoice;
pub mod error;

pub use category::DelegateCategory;
pub use schedule::{CategoryTable, DomesticTable, InternationalTable, PricingRow, PricingSchedule};
pub use selections::{RegistrationForm, RegistrationSelections};
pub use engine::{PricingEngine, SelectionPolicy};
pub use invoice::{LineItem, LineItemKind, PricedInvoice};
pub use error::PricingError;
