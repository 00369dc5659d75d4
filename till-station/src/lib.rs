//! Till Station - receipt printing for the sales back office
//!
//! Reads a sales order or posted invoice from the catalog store, renders it
//! into an ESC/POS byte stream and sends it to a receipt printer through a
//! status-checked port.
//!
//! Module structure:
//!
//! ```text
//! till-station/src/
//! ├── config.rs    # environment-driven configuration
//! ├── store.rs     # sales datastore trait + JSON catalog implementation
//! ├── receipt.rs   # document snapshot + receipt renderer
//! └── service.rs   # print service wiring store, renderer and printer
//! ```

pub mod config;
pub mod receipt;
pub mod service;
pub mod store;

// Re-exports
pub use config::{Config, TransportKind};
pub use receipt::{DocumentSnapshot, ReceiptLine, ReceiptRenderer};
pub use service::{PrintService, ServiceError, ServiceResult, StationPrinter};
pub use store::{JsonStore, SalesStore, StoreError, StoreResult};

/// Load `.env` and initialize tracing
///
/// `RUST_LOG` controls the filter; default level is `info`.
pub fn setup_environment() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}
