//! Request and response bodies

pub mod pricing;
pub mod invoices;
