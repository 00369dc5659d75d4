//! Receipt renderer
//!
//! Renders a sales document snapshot into ESC/POS ticket chunks. Orders and
//! posted invoices go through the same sequence; [`shared::DocumentKind`]
//! only changes the document-number label.

use tracing::instrument;

use shared::models::{Customer, Item, Region, SalesHeader, SalesLine};
use shared::money::{format_amount, parse_amount, MoneyResult};
use shared::totals::DocumentTotals;
use till_printer::TicketBuilder;

use crate::store::{SalesStore, StoreResult};

/// A document line joined with its catalog item
#[derive(Debug, Clone)]
pub struct ReceiptLine {
    pub line: SalesLine,
    pub item: Item,
}

/// Read-once snapshot of everything one receipt needs
///
/// Fetched in full before rendering starts; the print operation never goes
/// back to the store.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    pub header: SalesHeader,
    pub customer: Customer,
    pub region: Region,
    pub lines: Vec<ReceiptLine>,
}

impl DocumentSnapshot {
    /// Resolve a document number into a full snapshot
    pub fn fetch<S: SalesStore + ?Sized>(store: &S, document_no: &str) -> StoreResult<Self> {
        let header = store.header(document_no)?;
        let customer = store.customer(&header.sell_to_customer_no)?;
        let region = store.region(&customer.region_code)?;

        let lines = store
            .sales_lines(document_no)?
            .into_iter()
            .map(|line| {
                let item = store.item(&line.item_no)?;
                Ok(ReceiptLine { line, item })
            })
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(Self {
            header,
            customer,
            region,
            lines,
        })
    }
}

/// Receipt renderer
pub struct ReceiptRenderer<'a> {
    snapshot: &'a DocumentSnapshot,
    letterhead: &'a [String],
    width: usize,
}

impl<'a> ReceiptRenderer<'a> {
    /// Create a renderer for one snapshot
    ///
    /// `width` is the paper width in characters (32 for 58mm roll paper).
    pub fn new(snapshot: &'a DocumentSnapshot, letterhead: &'a [String], width: usize) -> Self {
        Self {
            snapshot,
            letterhead,
            width,
        }
    }

    /// Render the whole receipt
    ///
    /// Fails on the first malformed amount field, before anything is sent.
    #[instrument(skip(self), fields(document_no = %self.snapshot.header.document_no))]
    pub fn render(&self) -> MoneyResult<TicketBuilder> {
        let mut b = TicketBuilder::new(self.width);

        b.page_area();
        self.render_letterhead(&mut b);
        self.render_header(&mut b);
        self.render_lines(&mut b)?;
        self.render_totals(&mut b)?;
        self.render_footer(&mut b);

        Ok(b)
    }

    /// Centered letterhead block
    fn render_letterhead(&self, b: &mut TicketBuilder) {
        b.center();
        for line in self.letterhead {
            b.line(line);
        }
        b.newline();
    }

    /// Left-aligned header fields
    fn render_header(&self, b: &mut TicketBuilder) {
        let header = &self.snapshot.header;
        let customer = &self.snapshot.customer;
        let region = &self.snapshot.region;

        b.left();
        b.line(&format!(
            "{}: {}",
            header.kind.number_label(),
            header.document_no
        ));
        b.line(&format!("Date: {}", header.order_date.format("%d/%m/%Y")));
        b.line(&format!("Customer: {}", customer.name));
        b.line(&format!("Region : {}-{}", region.name, region.code));
        b.line(&format!("Customer Note: {}", customer.note));
        b.line(&format!("Order Note : {}", header.comment));
        b.sep();
    }

    /// Emphasized column label and the item rows
    fn render_lines(&self, b: &mut TicketBuilder) -> MoneyResult<()> {
        b.emphasis_on();
        b.line("Description");
        b.emphasis_off();
        b.sep();

        for ReceiptLine { line, item } in &self.snapshot.lines {
            let unit_price = parse_amount("unit_price", &line.unit_price)?;
            let line_total = parse_amount("line_amount_incl_vat", &line.line_amount_incl_vat)?;

            b.left();
            b.line(&item.description);
            b.text(&format!("{} {} - ", line.quantity, line.unit));
            b.currency();
            b.text(&format_amount(unit_price));
            b.right();
            b.currency();
            b.line(&format_amount(line_total));
        }

        Ok(())
    }

    /// Right-aligned, emphasized totals block
    fn render_totals(&self, b: &mut TicketBuilder) -> MoneyResult<()> {
        let totals = DocumentTotals::accumulate(self.snapshot.lines.iter().map(|l| &l.line))?;

        b.emphasis_on();
        b.newline();
        b.sep();
        b.right();

        b.line(&format!("Total Line: {}", totals.line_count));
        b.line(&format!("Quantity: {}", format_amount(totals.quantity)));
        b.text("Total Net Amount: ");
        b.currency();
        b.line(&format_amount(totals.net_amount));
        b.text("VAT Amount: ");
        b.currency();
        b.line(&format_amount(totals.vat_amount()));
        b.text("Discount Amount: ");
        b.currency();
        b.line(&format_amount(totals.discount_amount));
        b.sep();
        b.text("Total Amount: ");
        b.currency();
        b.line(&format_amount(totals.total_amount));
        b.sep();
        b.emphasis_off();

        Ok(())
    }

    /// Salesperson line and paper feed padding
    fn render_footer(&self, b: &mut TicketBuilder) {
        b.line(&format!(
            "Sales Person Code: {}",
            self.snapshot.header.salesperson_code
        ));
        b.text("\n\n\n");
    }
}
