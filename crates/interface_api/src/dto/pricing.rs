//! Pricing DTOs

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{Currency, Money};
use domain_pricing::{DelegateCategory, LineItemKind, PricedInvoice, PricingRow};

#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub kind: LineItemKind,
    pub description: String,
    pub amount: Decimal,
    pub formatted: String,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub category: DelegateCategory,
    pub currency: Currency,
    pub base_price: Decimal,
    pub accommodation_price: Option<Decimal>,
    pub excursion_price: Option<Decimal>,
    pub dinner_gala_price: Option<Decimal>,
    pub total_amount: Decimal,
    pub total_formatted: String,
    pub line_items: Vec<LineItemResponse>,
}

impl From<&PricedInvoice> for QuoteResponse {
    fn from(invoice: &PricedInvoice) -> Self {
        let amount = |money: Money| money.round_to_currency().amount();

        Self {
            category: invoice.category(),
            currency: invoice.currency(),
            base_price: amount(invoice.base_price()),
            accommodation_price: invoice.accommodation_price().map(amount),
            excursion_price: invoice.excursion_price().map(amount),
            dinner_gala_price: invoice.dinner_gala_price().map(amount),
            total_amount: amount(invoice.total_amount()),
            total_formatted: invoice.total_amount().to_invoice_string(),
            line_items: invoice
                .line_items()
                .into_iter()
                .map(|item| LineItemResponse {
                    kind: item.kind,
                    formatted: item.amount.to_invoice_string(),
                    amount: amount(item.amount),
                    description: item.description,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub rows: Vec<PricingRow>,
}
