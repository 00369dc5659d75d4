//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub no: String,
    pub name: String,
    pub region_code: String,
    /// Free-text note printed under the header fields
    #[serde(default)]
    pub note: String,
}
