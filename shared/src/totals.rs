//! Document totals accumulation
//!
//! Sums the per-line string amounts through the money boundary. VAT is not a
//! stored field; it is derived as total-including-VAT minus net.

use rust_decimal::Decimal;

use crate::models::SalesLine;
use crate::money::{parse_amount, MoneyResult};

/// Aggregates for the receipt totals block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTotals {
    /// Number of document lines
    pub line_count: usize,
    /// Sum of line quantities
    pub quantity: Decimal,
    /// Sum of line amounts excluding VAT
    pub net_amount: Decimal,
    /// Sum of line amounts including VAT
    pub total_amount: Decimal,
    /// Sum of line discount amounts
    pub discount_amount: Decimal,
}

impl DocumentTotals {
    /// Accumulate totals over the document lines
    ///
    /// Fails on the first non-numeric field, naming it. An empty document
    /// yields zero for every aggregate.
    pub fn accumulate<'a, I>(lines: I) -> MoneyResult<Self>
    where
        I: IntoIterator<Item = &'a SalesLine>,
    {
        let mut totals = Self {
            line_count: 0,
            quantity: Decimal::ZERO,
            net_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
        };

        for line in lines {
            totals.line_count += 1;
            totals.quantity += parse_amount("quantity", &line.quantity)?;
            totals.discount_amount +=
                parse_amount("line_discount_amount", &line.line_discount_amount)?;
            totals.net_amount += parse_amount("line_amount", &line.line_amount)?;
            totals.total_amount += parse_amount("line_amount_incl_vat", &line.line_amount_incl_vat)?;
        }

        Ok(totals)
    }

    /// VAT amount: total including VAT minus net
    pub fn vat_amount(&self) -> Decimal {
        self.total_amount - self.net_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::format_amount;

    fn line(qty: &str, net: &str, incl: &str, discount: &str) -> SalesLine {
        SalesLine {
            item_no: "ITEM-1".to_string(),
            quantity: qty.to_string(),
            unit: "PCS".to_string(),
            unit_price: "5.00".to_string(),
            line_amount: net.to_string(),
            line_amount_incl_vat: incl.to_string(),
            line_discount_amount: discount.to_string(),
        }
    }

    #[test]
    fn test_empty_document_is_all_zeros() {
        let lines: Vec<SalesLine> = Vec::new();
        let totals = DocumentTotals::accumulate(&lines).unwrap();
        assert_eq!(totals.line_count, 0);
        assert_eq!(format_amount(totals.quantity), "0.00");
        assert_eq!(format_amount(totals.net_amount), "0.00");
        assert_eq!(format_amount(totals.vat_amount()), "0.00");
        assert_eq!(format_amount(totals.discount_amount), "0.00");
        assert_eq!(format_amount(totals.total_amount), "0.00");
    }

    #[test]
    fn test_vat_is_total_minus_net() {
        let lines = vec![
            line("1", "4.00", "4.80", "0.00"),
            line("2", "6.00", "7.20", "0.50"),
        ];
        let totals = DocumentTotals::accumulate(&lines).unwrap();
        assert_eq!(totals.line_count, 2);
        assert_eq!(format_amount(totals.quantity), "3.00");
        assert_eq!(format_amount(totals.net_amount), "10.00");
        assert_eq!(format_amount(totals.total_amount), "12.00");
        assert_eq!(format_amount(totals.vat_amount()), "2.00");
        assert_eq!(format_amount(totals.discount_amount), "0.50");
    }

    #[test]
    fn test_bad_field_fails_whole_accumulation() {
        let lines = vec![line("1", "4.00", "4.80", "0.00"), line("two", "1", "1", "0")];
        let err = DocumentTotals::accumulate(&lines).unwrap_err();
        assert!(err.to_string().contains("quantity"));
    }

    #[test]
    fn test_fractional_quantities_sum() {
        let lines = vec![line("0.5", "1.00", "1.20", "0.00"), line("1.25", "2.50", "3.00", "0.00")];
        let totals = DocumentTotals::accumulate(&lines).unwrap();
        assert_eq!(format_amount(totals.quantity), "1.75");
    }
}
