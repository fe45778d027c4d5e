//! Core Kernel - Foundational types for the registration desk
//!
//! This crate provides the building blocks shared by the pricing and
//! invoicing domains:
//! - Money types with precise decimal arithmetic
//! - Clock and timezone handling for generation stamps
//! - Strongly-typed identifiers
//! - A bounded TTL cache for components that need one

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod cache;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{Clock, SystemClock, FixedClock, Timezone, TemporalError};
pub use identifiers::{EventId, InvoiceId};
pub use cache::TtlCache;
pub use error::CoreError;
