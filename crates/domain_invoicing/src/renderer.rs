//! Invoice rendering
//!
//! Combines a priced invoice with display metadata and encodes it through
//! a [`DocumentBackend`]. Rendering either returns a complete document or
//! fails before anything is encoded.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use core_kernel::{Clock, InvoiceId, SystemClock, Timezone};
use domain_pricing::{PricedInvoice, PricingEngine, RegistrationSelections};

use crate::document::{InvoiceBranding, InvoiceDocument};
use crate::error::InvoiceError;
use crate::filename::invoice_filename;
use crate::metadata::DisplayMetadata;
use crate::pdf::{DocumentBackend, PdfBackend};

/// A finished invoice file
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub invoice_id: InvoiceId,
    pub filename: String,
    pub content_type: &'static str,
    pub generated_at: DateTime<Utc>,
    pub bytes: Vec<u8>,
}

/// Produces invoice documents
pub trait InvoiceRenderer: Send + Sync {
    /// Renders one invoice
    ///
    /// # Errors
    ///
    /// * `RenderingFailed` - a required metadata field is missing or blank
    /// * `Encoding` - the backend could not produce the document
    fn render(
        &self,
        invoice: &PricedInvoice,
        metadata: &DisplayMetadata,
    ) -> Result<RenderedInvoice, InvoiceError>;
}

/// Renderer over a pluggable backend and clock
#[derive(Debug, Clone)]
pub struct StandardInvoiceRenderer<B = PdfBackend, C = SystemClock> {
    backend: B,
    clock: C,
    timezone: Timezone,
    branding: InvoiceBranding,
}

impl StandardInvoiceRenderer {
    /// PDF output, wall clock, default timezone and branding
    pub fn pdf() -> Self {
        Self::new(PdfBackend::new(), SystemClock)
    }
}

impl Default for StandardInvoiceRenderer {
    fn default() -> Self {
        Self::pdf()
    }
}

impl<B: DocumentBackend, C: Clock> StandardInvoiceRenderer<B, C> {
    pub fn new(backend: B, clock: C) -> Self {
        Self {
            backend,
            clock,
            timezone: Timezone::default(),
            branding: InvoiceBranding::default(),
        }
    }

    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_branding(mut self, branding: InvoiceBranding) -> Self {
        self.branding = branding;
        self
    }

    pub fn timezone(&self) -> &Timezone {
        &self.timezone
    }

    /// Builds the layout without encoding it
    pub fn compose(
        &self,
        invoice: &PricedInvoice,
        metadata: &DisplayMetadata,
    ) -> Result<(InvoiceDocument, DateTime<Utc>), InvoiceError> {
        let metadata = metadata.normalized()?;
        let generated_at = self.clock.now();
        let document = InvoiceDocument::compose(
            invoice,
            &metadata,
            &self.branding,
            generated_at,
            &self.timezone,
        );
        Ok((document, generated_at))
    }
}

impl<B: DocumentBackend, C: Clock> InvoiceRenderer for StandardInvoiceRenderer<B, C> {
    #[instrument(skip_all, fields(registration = %metadata.registration_number))]
    fn render(
        &self,
        invoice: &PricedInvoice,
        metadata: &DisplayMetadata,
    ) -> Result<RenderedInvoice, InvoiceError> {
        let (document, generated_at) = self.compose(invoice, metadata)?;
        let bytes = self.backend.encode(&document)?;
        let filename = invoice_filename(
            &metadata.registration_number,
            document.issued_on,
            self.backend.extension(),
        );

        let rendered = RenderedInvoice {
            invoice_id: InvoiceId::new(),
            filename,
            content_type: self.backend.content_type(),
            generated_at,
            bytes,
        };

        info!(
            invoice_id = %rendered.invoice_id,
            filename = %rendered.filename,
            size = rendered.bytes.len(),
            "Invoice rendered"
        );
        Ok(rendered)
    }
}

/// Prices a registration and renders its invoice in one step
pub struct InvoiceService<R> {
    engine: PricingEngine,
    renderer: R,
}

impl<R: InvoiceRenderer> InvoiceService<R> {
    pub fn new(engine: PricingEngine, renderer: R) -> Self {
        Self { engine, renderer }
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// # Errors
    ///
    /// `Pricing` when the selections cannot be priced, otherwise any
    /// rendering error.
    pub fn issue(
        &self,
        selections: &RegistrationSelections,
        metadata: &DisplayMetadata,
    ) -> Result<(PricedInvoice, RenderedInvoice), InvoiceError> {
        let invoice = self.engine.compute(selections)?;
        let rendered = self.renderer.render(&invoice, metadata)?;
        Ok((invoice, rendered))
    }
}
