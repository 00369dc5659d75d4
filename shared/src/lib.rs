//! # shared
//!
//! Domain types shared across the Till workspace.
//!
//! ## Scope
//!
//! This crate holds WHAT gets printed, not how:
//! - Sales document snapshots (header, lines, customer, region, item)
//! - The validated money boundary (string amounts → `Decimal`)
//! - Document totals accumulation
//!
//! Rendering and transport live in `till-printer` and `till-station`.

pub mod models;
pub mod money;
pub mod totals;

pub use models::{Customer, DocumentKind, Item, Region, SalesHeader, SalesLine};
pub use money::{format_amount, parse_amount, MoneyError, MoneyResult};
pub use totals::DocumentTotals;
