//! Invoice document layout
//!
//! [`InvoiceDocument`] is the backend-independent description of an
//! invoice. Blocks always appear in the same order:
//!
//! 1. Branding header and invoice reference
//! 2. Event details
//! 3. Participant details
//! 4. Charges table and total
//! 5. Generation footer
//!
//! Optional metadata that is absent produces no row at all.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::Timezone;
use domain_pricing::PricedInvoice;

use crate::filename::invoice_stem;
use crate::metadata::DisplayMetadata;

/// Issuer block printed at the top of every invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceBranding {
    pub organization: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl Default for InvoiceBranding {
    fn default() -> Self {
        Self {
            organization: "Conference Secretariat".to_string(),
            tagline: None,
            contact: None,
        }
    }
}

/// Titled block of label/value rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub rows: Vec<(String, String)>,
}

impl Section {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            rows: Vec::new(),
        }
    }

    fn row(mut self, label: &str, value: impl Into<String>) -> Self {
        self.rows.push((label.to_string(), value.into()));
        self
    }

    fn optional_row(self, label: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.row(label, value),
            None => self,
        }
    }
}

/// One row of the charges table, amount already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRow {
    pub description: String,
    pub amount: String,
}

/// Visual weight of a laid-out line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    Strong,
    Small,
    Blank,
}

/// A single line of the final layout, with an optional right-hand amount column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub style: LineStyle,
    pub text: String,
    pub amount: Option<String>,
}

impl LayoutLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
            amount: None,
        }
    }

    fn with_amount(style: LineStyle, text: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
            amount: Some(amount.into()),
        }
    }

    fn blank() -> Self {
        Self::new(LineStyle::Blank, "")
    }
}

/// Width of the description column in the plain-text projection
const TEXT_COLUMN_WIDTH: usize = 52;

/// Complete invoice layout, ready for a [`crate::DocumentBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument {
    pub branding: InvoiceBranding,
    pub reference: String,
    pub issued_on: NaiveDate,
    pub sections: Vec<Section>,
    pub charges: Vec<ChargeRow>,
    pub total: String,
    pub footer: String,
}

impl InvoiceDocument {
    /// Lays out an invoice
    ///
    /// `metadata` is expected to be normalized already; blank required
    /// fields are the caller's responsibility.
    pub fn compose(
        invoice: &PricedInvoice,
        metadata: &DisplayMetadata,
        branding: &InvoiceBranding,
        generated_at: DateTime<Utc>,
        timezone: &Timezone,
    ) -> Self {
        let local = timezone.to_local(generated_at);
        let issued_on = local.date_naive();

        let event = Section::new("Event Details")
            .row("Event", metadata.event_title.as_str())
            .optional_row("Date", metadata.event_date.as_deref())
            .optional_row("Venue", metadata.venue.as_deref());

        let participant = Section::new("Participant Details")
            .row("Name", metadata.participant_name.as_str())
            .row("Registration No.", metadata.registration_number.as_str())
            .row("Delegate category", invoice.category().display_name())
            .optional_row("Organization", metadata.organization.as_deref())
            .optional_row("Position", metadata.position.as_deref())
            .optional_row("Country", metadata.country.as_deref())
            .optional_row("Email", metadata.email.as_deref())
            .optional_row(
                "Payment status",
                metadata.payment_status.as_ref().map(|status| status.label()),
            );

        let charges = invoice
            .line_items()
            .into_iter()
            .map(|item| ChargeRow {
                description: item.description,
                amount: item.amount.to_invoice_string(),
            })
            .collect();

        Self {
            branding: branding.clone(),
            reference: invoice_stem(&metadata.registration_number, issued_on),
            issued_on,
            sections: vec![event, participant],
            charges,
            total: invoice.total_amount().to_invoice_string(),
            footer: format!(
                "Generated on {} ({})",
                local.format("%d %B %Y at %H:%M"),
                timezone.name()
            ),
        }
    }

    /// Ordered lines as a backend should draw them
    pub fn layout(&self) -> Vec<LayoutLine> {
        let mut lines = vec![LayoutLine::new(LineStyle::Title, self.branding.organization.as_str())];
        if let Some(tagline) = &self.branding.tagline {
            lines.push(LayoutLine::new(LineStyle::Small, tagline.as_str()));
        }
        if let Some(contact) = &self.branding.contact {
            lines.push(LayoutLine::new(LineStyle::Small, contact.as_str()));
        }

        lines.push(LayoutLine::blank());
        lines.push(LayoutLine::new(LineStyle::Heading, "INVOICE"));
        lines.push(LayoutLine::new(LineStyle::Body, format!("Reference: {}", self.reference)));
        lines.push(LayoutLine::new(
            LineStyle::Body,
            format!("Date: {}", self.issued_on.format("%d %B %Y")),
        ));

        for section in &self.sections {
            lines.push(LayoutLine::blank());
            lines.push(LayoutLine::new(LineStyle::Heading, section.title.as_str()));
            for (label, value) in &section.rows {
                lines.push(LayoutLine::new(LineStyle::Body, format!("{label}: {value}")));
            }
        }

        lines.push(LayoutLine::blank());
        lines.push(LayoutLine::with_amount(LineStyle::Heading, "Description", "Amount"));
        for charge in &self.charges {
            lines.push(LayoutLine::with_amount(
                LineStyle::Body,
                charge.description.as_str(),
                charge.amount.as_str(),
            ));
        }
        lines.push(LayoutLine::with_amount(LineStyle::Strong, "TOTAL", self.total.as_str()));

        lines.push(LayoutLine::blank());
        lines.push(LayoutLine::new(LineStyle::Small, self.footer.as_str()));
        lines
    }

    /// Plain-text projection of [`layout`](Self::layout)
    pub fn to_text_lines(&self) -> Vec<String> {
        self.layout()
            .into_iter()
            .map(|line| match line.amount {
                Some(amount) => format!("{:<width$}{:>18}", line.text, amount, width = TEXT_COLUMN_WIDTH),
                None => line.text,
            })
            .map(|line| line.trim_end().to_string())
            .collect()
    }
}
