//! Region Model

use serde::{Deserialize, Serialize};

/// Sales region entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
}
