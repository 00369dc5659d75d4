//! Sales datastore
//!
//! [`SalesStore`] is the read-only lookup surface the receipt pipeline
//! needs: document header, its lines, the customer, the customer's region
//! and the catalog items. [`JsonStore`] serves those lookups from a JSON
//! catalog file loaded once at startup.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use shared::models::{Customer, Item, Region, SalesHeader, SalesLine};

/// Datastore errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only sales data lookups
pub trait SalesStore: Send + Sync {
    /// Document header by document number
    fn header(&self, document_no: &str) -> StoreResult<SalesHeader>;

    /// Document lines by document number (possibly empty)
    fn sales_lines(&self, document_no: &str) -> StoreResult<Vec<SalesLine>>;

    /// Customer by customer number
    fn customer(&self, no: &str) -> StoreResult<Customer>;

    /// Region by region code
    fn region(&self, code: &str) -> StoreResult<Region>;

    /// Catalog item by item number
    fn item(&self, no: &str) -> StoreResult<Item>;
}

/// A document line as stored, keyed by its document
#[derive(Debug, Clone, Deserialize)]
struct CatalogLine {
    document_no: String,
    #[serde(flatten)]
    line: SalesLine,
}

/// The whole catalog file
#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(default)]
    headers: Vec<SalesHeader>,
    #[serde(default)]
    lines: Vec<CatalogLine>,
    #[serde(default)]
    customers: Vec<Customer>,
    #[serde(default)]
    regions: Vec<Region>,
    #[serde(default)]
    items: Vec<Item>,
}

/// JSON-file-backed sales store
#[derive(Debug)]
pub struct JsonStore {
    catalog: Catalog,
}

impl JsonStore {
    /// Load a catalog file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let store = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            headers = store.catalog.headers.len(),
            lines = store.catalog.lines.len(),
            "Sales catalog loaded"
        );
        Ok(store)
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(raw: &str) -> StoreResult<Self> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        Ok(Self { catalog })
    }
}

impl SalesStore for JsonStore {
    fn header(&self, document_no: &str) -> StoreResult<SalesHeader> {
        self.catalog
            .headers
            .iter()
            .find(|h| h.document_no == document_no)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "Sales header",
                key: document_no.to_string(),
            })
    }

    fn sales_lines(&self, document_no: &str) -> StoreResult<Vec<SalesLine>> {
        Ok(self
            .catalog
            .lines
            .iter()
            .filter(|l| l.document_no == document_no)
            .map(|l| l.line.clone())
            .collect())
    }

    fn customer(&self, no: &str) -> StoreResult<Customer> {
        self.catalog
            .customers
            .iter()
            .find(|c| c.no == no)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "Customer",
                key: no.to_string(),
            })
    }

    fn region(&self, code: &str) -> StoreResult<Region> {
        self.catalog
            .regions
            .iter()
            .find(|r| r.code == code)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "Region",
                key: code.to_string(),
            })
    }

    fn item(&self, no: &str) -> StoreResult<Item> {
        self.catalog
            .items
            .iter()
            .find(|i| i.no == no)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "Item",
                key: no.to_string(),
            })
    }
}
