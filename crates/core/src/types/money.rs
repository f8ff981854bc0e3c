//! Monetary amounts as decimal strings with an ISO 4217 currency code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary amount with currency code.
///
/// The amount is kept as a decimal string (preserves precision across the
/// wire); the currency code is always upper-case. Construct through
/// [`Money::new`] or [`Money::zero`] so both invariants hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string, never negative.
    pub amount: String,
    /// ISO 4217 currency code, upper-case.
    pub currency_code: String,
}

impl Money {
    /// Create a normalized `Money`.
    ///
    /// Missing amounts become `"0"`, negative or unparseable amounts are
    /// clamped to `"0"`, and the currency code is upper-cased.
    #[must_use]
    pub fn new(amount: Option<&str>, currency_code: &str) -> Self {
        let normalized = match amount {
            Some(raw) if !raw.trim().is_empty() => match raw.trim().parse::<Decimal>() {
                Ok(value) if value.is_sign_negative() => "0".to_string(),
                Ok(_) => raw.trim().to_string(),
                Err(_) => "0".to_string(),
            },
            _ => "0".to_string(),
        };

        Self {
            amount: normalized,
            currency_code: currency_code.to_uppercase(),
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub fn zero(currency_code: &str) -> Self {
        Self::new(None, currency_code)
    }

    /// Parse the amount as a decimal, defaulting to zero.
    #[must_use]
    pub fn decimal(&self) -> Decimal {
        self.amount.parse().unwrap_or_default()
    }
}

/// Price range for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
    /// Maximum price among all variants.
    pub max_variant_price: Money,
}
