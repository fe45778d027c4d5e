//! Route handlers

pub mod health;
pub mod pricing;
pub mod invoices;
