//! # till-printer
//!
//! ESC/POS receipt printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building (chunked ticket builder)
//! - Code-page text encoding (pound glyph)
//! - The status-checked send sequence (offline / cover-open / paper-empty)
//! - Serial (USB/Bluetooth SPP) and network (TCP port 9100) ports
//!
//! Business logic (WHAT to print) should stay in application code:
//! - Receipt rendering → till-station
//!
//! ## Example
//!
//! ```ignore
//! use till_printer::{PortSettings, Printer, SendOptions, SerialPrinter};
//!
//! // Build ESC/POS content
//! let mut ticket = till_printer::TicketBuilder::new(32);
//! ticket.page_area().center().line("Company Name").left();
//!
//! // Send through the checked block
//! let printer = SerialPrinter::new(
//!     "/dev/rfcomm0",
//!     PortSettings::parse("9600/8N1")?,
//!     SendOptions::default(),
//! );
//! printer.print(&ticket.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod net;
mod port;
mod printer;
mod serial;

// Re-exports
pub use encoding::{encode_text, encoded_width, pad_text};
pub use error::{PrintError, PrintResult};
pub use escpos::{command, TicketBuilder};
pub use net::NetworkPort;
pub use port::{Parity, PortSettings, PrinterPort, PrinterStatus};
pub use printer::{send_checked, NetworkPrinter, Printer, SendOptions, SerialPrinter};
pub use serial::SerialPrinterPort;
