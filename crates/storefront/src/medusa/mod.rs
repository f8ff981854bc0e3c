//! Medusa v2 Store API client.
//!
//! # Architecture
//!
//! - Medusa is source of truth - NO local sync, direct REST calls
//! - Raw wire payloads are normalized into the canonical shapes from
//!   `mero-closet-core` at the module boundary
//! - In-memory caching via `moka` for catalog responses; carts are never
//!   cached (mutable state)
//!
//! # Fail-soft contract
//!
//! Catalog and cart reads degrade to empty results when the backend is
//! unconfigured, unreachable, or returns an error status - pages render with
//! empty data instead of crashing. Only malformed response bodies propagate
//! as errors. Cart mutations keep the per-step failure cause in a structured
//! [`CartMutation`] result instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use mero_closet_storefront::medusa::StoreClient;
//!
//! let client = StoreClient::new(&config.medusa);
//!
//! // Get a product
//! let product = client.get_product("classic-black-abaya").await?;
//!
//! // Add items to a new cart
//! let mutation = client
//!     .add_to_cart(None, &[CartLineInput { merchandise_id: variant_id, quantity: 1 }])
//!     .await;
//! ```

mod store;

pub use store::{CartMutation, CartStepFailure, PaymentInit, StoreClient};

use thiserror::Error;

/// Errors that can occur when talking to the Medusa Store API.
///
/// The variants are the full taxonomy the HTTP wrapper distinguishes; which
/// of them soft-fail to empty data and which propagate is decided in exactly
/// one place (`StoreClient::fetch`).
#[derive(Debug, Error)]
pub enum MedusaError {
    /// Backend URL or publishable key is not configured.
    #[error("Medusa backend is not configured")]
    Unconfigured,

    /// Transport-level failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("HTTP {status} from {path}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path, for logging.
        path: String,
    },

    /// Response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl MedusaError {
    /// Whether this error is a 404 from the backend.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MedusaError::Status {
            status: 500,
            path: "/products".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500 from /products");

        assert_eq!(
            MedusaError::Unconfigured.to_string(),
            "Medusa backend is not configured"
        );
    }

    #[test]
    fn test_is_not_found() {
        let not_found = MedusaError::Status {
            status: 404,
            path: "/carts/cart_gone".to_string(),
        };
        assert!(not_found.is_not_found());

        let server_error = MedusaError::Status {
            status: 503,
            path: "/products".to_string(),
        };
        assert!(!server_error.is_not_found());
        assert!(!MedusaError::Unconfigured.is_not_found());
    }
}
