//! Registration email templates
//!
//! Builds the confirmation email that accompanies an invoice. Sending it is
//! left to whatever mail transport the deployment uses.

use chrono::NaiveDate;
use serde::Serialize;

use domain_pricing::PricedInvoice;

use crate::error::InvoiceError;
use crate::filename::invoice_filename;
use crate::metadata::DisplayMetadata;

/// A composed email, ready for a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

pub struct NotificationTemplate;

impl NotificationTemplate {
    /// Summary email for a rendered invoice
    ///
    /// `issued_on` names the attached file the same way the renderer does.
    pub fn invoice_summary(
        invoice: &PricedInvoice,
        metadata: &DisplayMetadata,
        issued_on: NaiveDate,
    ) -> Result<EmailMessage, InvoiceError> {
        let metadata = metadata.normalized()?;
        let filename = invoice_filename(&metadata.registration_number, issued_on, "pdf");
        let items = invoice.line_items();
        let total = invoice.total_amount().to_invoice_string();

        let subject = format!(
            "Registration confirmed: {} ({})",
            metadata.event_title, metadata.registration_number
        );

        let mut text = format!(
            "Dear {},\n\nThank you for registering for {}.\n",
            metadata.participant_name, metadata.event_title
        );
        if let Some(date) = &metadata.event_date {
            text.push_str(&format!("Date: {date}\n"));
        }
        if let Some(venue) = &metadata.venue {
            text.push_str(&format!("Venue: {venue}\n"));
        }
        text.push_str(&format!(
            "Registration number: {}\n\nCharges:\n",
            metadata.registration_number
        ));
        for item in &items {
            text.push_str(&format!(
                "  - {}: {}\n",
                item.description,
                item.amount.to_invoice_string()
            ));
        }
        text.push_str(&format!("Total: {total}\n\nYour invoice is attached as {filename}.\n"));
        if let Some(status) = metadata.payment_status {
            text.push_str(&format!("Payment status: {status}\n"));
        }

        let mut html = format!(
            "<p>Dear {},</p>\n<p>Thank you for registering for <strong>{}</strong>.</p>\n<ul>\n",
            escape_html(&metadata.participant_name),
            escape_html(&metadata.event_title)
        );
        if let Some(date) = &metadata.event_date {
            html.push_str(&format!("<li>Date: {}</li>\n", escape_html(date)));
        }
        if let Some(venue) = &metadata.venue {
            html.push_str(&format!("<li>Venue: {}</li>\n", escape_html(venue)));
        }
        html.push_str(&format!(
            "<li>Registration number: {}</li>\n</ul>\n<table>\n",
            escape_html(&metadata.registration_number)
        ));
        for item in &items {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(&item.description),
                escape_html(&item.amount.to_invoice_string())
            ));
        }
        html.push_str(&format!(
            "<tr><th>Total</th><th>{}</th></tr>\n</table>\n<p>Your invoice is attached as {}.</p>\n",
            escape_html(&total),
            escape_html(&filename)
        ));
        if let Some(status) = metadata.payment_status {
            html.push_str(&format!("<p>Payment status: {}</p>\n", escape_html(status.label())));
        }

        Ok(EmailMessage {
            subject,
            text_body: text,
            html_body: html,
        })
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
