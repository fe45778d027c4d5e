//! Invoicing Domain
//!
//! Turns a [`domain_pricing::PricedInvoice`] into something a delegate can
//! download or receive by email:
//! - [`DisplayMetadata`] carries the participant and event details
//! - [`InvoiceDocument`] lays the invoice out independently of file format
//! - [`PdfBackend`] encodes that layout as a PDF
//! - [`StandardInvoiceRenderer`] ties the two together with a clock and
//!   timezone, producing `Invoice-<registration>-<YYYYMMDD>.pdf`
//! - [`NotificationTemplate`] builds the matching confirmation email

pub mod metadata;
pub mod document;
pub mod filename;
pub mod pdf;
pub mod renderer;
pub mod notification;
pub mod error;

pub use metadata::{DisplayMetadata, PaymentStatus};
pub use document::{ChargeRow, InvoiceBranding, InvoiceDocument, LayoutLine, LineStyle, Section};
pub use filename::{invoice_filename, invoice_stem, sanitize_registration_number};
pub use pdf::{DocumentBackend, PdfBackend};
pub use renderer::{InvoiceRenderer, InvoiceService, RenderedInvoice, StandardInvoiceRenderer};
pub use notification::{EmailMessage, NotificationTemplate};
pub use error::InvoiceError;
