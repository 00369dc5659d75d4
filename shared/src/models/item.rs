//! Item Model

use serde::{Deserialize, Serialize};

/// Catalog item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub no: String,
    pub description: String,
}
