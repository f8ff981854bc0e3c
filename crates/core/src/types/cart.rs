//! Cart types and cart mutation inputs.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::product::{Image, SelectedOption};

/// Cart cost summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCost {
    /// Subtotal before tax/shipping.
    pub subtotal_amount: Money,
    /// Total amount.
    pub total_amount: Money,
    /// Total tax amount.
    pub total_tax_amount: Money,
}

/// Cost for a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineCost {
    /// Line total (after discounts when the backend reports one).
    pub total_amount: Money,
}

/// Simplified product info embedded in cart merchandise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMerchandiseProduct {
    /// Product ID.
    pub id: String,
    /// Product handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Featured image (empty URL when no image could be resolved).
    pub featured_image: Image,
}

/// Merchandise in a cart line (variant snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMerchandise {
    /// Variant ID.
    pub id: String,
    /// Variant title.
    pub title: String,
    /// Selected options.
    pub selected_options: Vec<SelectedOption>,
    /// Parent product summary.
    pub product: CartMerchandiseProduct,
}

/// A line item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart line ID.
    pub id: String,
    /// Quantity.
    pub quantity: i64,
    /// Line cost.
    pub cost: CartLineCost,
    /// Product variant snapshot.
    pub merchandise: CartMerchandise,
}

/// Provider-specific payment state for one payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Backend payment provider identifier.
    pub provider_id: String,
    /// Client secret for confirming payment; absent when the provider did
    /// not issue one (UI shows a retry affordance).
    pub client_secret: Option<String>,
}

/// A shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart ID.
    pub id: String,
    /// Checkout URL for this cart.
    pub checkout_url: String,
    /// Cart cost summary.
    pub cost: CartCost,
    /// Cart lines.
    pub lines: Vec<CartLine>,
    /// Sum of line quantities.
    pub total_quantity: i64,
    /// Payment session, present after payment initialization.
    pub payment_session: Option<PaymentSession>,
}

/// Input for adding a line to cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: String,
    /// Quantity to add.
    pub quantity: i64,
}

/// Input for updating a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: String,
    /// New quantity.
    pub quantity: i64,
}
