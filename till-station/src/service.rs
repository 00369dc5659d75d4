//! Print service
//!
//! Wires the sales store, the receipt renderer and a printer adapter into
//! the one operation the station performs: print a document. Every failure
//! maps to a [`ServiceError`] whose `Display` text is what the operator
//! sees.

use thiserror::Error;
use tracing::{error, info, instrument};

use shared::money::MoneyError;
use till_printer::{
    NetworkPrinter, PortSettings, PrintError, Printer, SendOptions, SerialPrinter,
};

use crate::config::{Config, TransportKind};
use crate::receipt::{DocumentSnapshot, ReceiptRenderer};
use crate::store::{SalesStore, StoreError};

/// Print service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Print(#[from] PrintError),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Receipt print service
pub struct PrintService<S, P> {
    store: S,
    printer: P,
    letterhead: Vec<String>,
    paper_width: usize,
}

impl<S: SalesStore, P: Printer> PrintService<S, P> {
    /// Create a print service
    pub fn new(store: S, printer: P, letterhead: Vec<String>, paper_width: usize) -> Self {
        Self {
            store,
            printer,
            letterhead,
            paper_width,
        }
    }

    /// Print one sales document
    ///
    /// Fetches the read-once snapshot, renders it, and sends the buffer
    /// through the status-checked block. No retry on failure.
    #[instrument(skip(self))]
    pub async fn print_document(&self, document_no: &str) -> ServiceResult<()> {
        let snapshot = DocumentSnapshot::fetch(&self.store, document_no)?;
        info!(
            kind = ?snapshot.header.kind,
            customer = %snapshot.customer.name,
            lines = snapshot.lines.len(),
            "Document snapshot resolved"
        );

        let data = ReceiptRenderer::new(&snapshot, &self.letterhead, self.paper_width)
            .render()?
            .build();

        if let Err(e) = self.printer.print(&data).await {
            error!(error = %e, "Print attempt failed");
            return Err(e.into());
        }

        info!(bytes = data.len(), "Receipt printed");
        Ok(())
    }
}

/// Printer adapter selected by configuration
pub enum StationPrinter {
    Serial(SerialPrinter),
    Network(NetworkPrinter),
}

impl StationPrinter {
    /// Build the configured printer adapter
    pub fn from_config(config: &Config) -> Result<Self, PrintError> {
        let options = SendOptions {
            settle_delay: config.settle_delay,
            end_check_timeout: config.end_check_timeout,
        };

        match config.transport {
            TransportKind::Serial => {
                let settings = PortSettings::parse(&config.port_settings)?;
                Ok(Self::Serial(
                    SerialPrinter::new(&config.port_name, settings, options)
                        .with_open_timeout(config.open_timeout),
                ))
            }
            TransportKind::Network => Ok(Self::Network(
                NetworkPrinter::from_addr(&config.printer_addr, options)?
                    .with_connect_timeout(config.open_timeout),
            )),
        }
    }
}

impl Printer for StationPrinter {
    async fn print(&self, data: &[u8]) -> Result<(), PrintError> {
        match self {
            Self::Serial(p) => p.print(data).await,
            Self::Network(p) => p.print(data).await,
        }
    }

    async fn is_online(&self) -> bool {
        match self {
            Self::Serial(p) => p.is_online().await,
            Self::Network(p) => p.is_online().await,
        }
    }
}
