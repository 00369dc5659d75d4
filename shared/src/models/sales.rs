//! Sales Document Models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which back-office document a header belongs to.
///
/// Orders and posted invoices share one layout; only the document-number
/// label on the receipt differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Order,
    Invoice,
}

impl DocumentKind {
    /// Label prefixing the document number on the receipt
    pub fn number_label(&self) -> &'static str {
        match self {
            DocumentKind::Order => "Order No",
            DocumentKind::Invoice => "Invoice No",
        }
    }
}

/// Sales document header (order or posted invoice)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesHeader {
    pub document_no: String,
    pub kind: DocumentKind,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub comment: String,
    pub salesperson_code: String,
    pub sell_to_customer_no: String,
}

/// Sales document line
///
/// Amount and quantity fields arrive as the back office formatted them —
/// strings. They cross [`crate::money::parse_amount`] before any arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesLine {
    pub item_no: String,
    pub quantity: String,
    pub unit: String,
    pub unit_price: String,
    pub line_amount: String,
    pub line_amount_incl_vat: String,
    pub line_discount_amount: String,
}
