//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_pricing::{LineItemKind, PricedInvoice};
use rust_decimal::Decimal;

/// Asserts that a Money value has the expected amount and currency
///
/// # Panics
///
/// Panics if either the currency or the amount differs
pub fn assert_money_eq(actual: &Money, amount: Decimal, currency: Currency) {
    assert_eq!(
        actual.currency(),
        currency,
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        currency
    );
    assert_eq!(
        actual.amount(),
        amount,
        "Amount mismatch: actual={}, expected={}",
        actual.amount(),
        amount
    );
}

/// Asserts the invoice total
pub fn assert_invoice_total(invoice: &PricedInvoice, amount: Decimal, currency: Currency) {
    assert_money_eq(&invoice.total_amount(), amount, currency);
}

/// Asserts that the line items add up to the total and share its currency
pub fn assert_line_items_balance(invoice: &PricedInvoice) {
    let items = invoice.line_items();
    for item in &items {
        assert_eq!(
            item.amount.currency(),
            invoice.currency(),
            "Line '{}' is in {} but the invoice is in {}",
            item.description,
            item.amount.currency(),
            invoice.currency()
        );
    }

    let sum: Decimal = items.iter().map(|item| item.amount.amount()).sum();
    assert_eq!(
        sum,
        invoice.total_amount().amount(),
        "Line items sum to {} but total is {}",
        sum,
        invoice.total_amount()
    );
}

/// Asserts the kinds of line items, in print order
pub fn assert_line_kinds(invoice: &PricedInvoice, expected: &[LineItemKind]) {
    let kinds: Vec<LineItemKind> = invoice.line_items().iter().map(|item| item.kind).collect();
    assert_eq!(kinds, expected, "Unexpected line items on invoice");
}

/// Asserts that bytes look like a complete PDF file
pub fn assert_pdf_document(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"%PDF-1.4"),
        "Document does not start with a PDF header"
    );
    let trimmed = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map(|end| &bytes[..=end])
        .unwrap_or_default();
    assert!(trimmed.ends_with(b"%%EOF"), "Document does not end with %%EOF");
}

/// Asserts the `Invoice-<registration>-<YYYYMMDD>.pdf` naming rule
pub fn assert_invoice_filename(filename: &str, registration_number: &str, issued_on: NaiveDate) {
    let expected = format!(
        "Invoice-{}-{}.pdf",
        registration_number,
        issued_on.format("%Y%m%d")
    );
    assert_eq!(filename, expected, "Unexpected invoice filename");
}
