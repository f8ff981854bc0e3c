//! Region type.

use serde::{Deserialize, Serialize};

/// A backend region determining currency and payment options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Region ID.
    pub id: String,
    /// ISO 4217 currency code, lower-case as the backend reports it.
    pub currency_code: String,
}
