//! Checkout route handler: payment session bootstrap.

use axum::{Json, extract::State, http::HeaderMap};
use serde::Serialize;
use tracing::instrument;

use mero_closet_core::Cart;

use crate::medusa::PaymentInit;
use crate::middleware::cart_cookie;
use crate::state::AppState;

/// Payment bootstrap outcome for the checkout UI.
///
/// `ready` may still lack a client secret on the cart's payment session;
/// the UI shows a retry affordance in that case.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentInitView {
    Ready { cart: Cart },
    NoProvider { cart: Cart },
    Unavailable { cart: Option<Cart>, error: String },
}

impl From<PaymentInit> for PaymentInitView {
    fn from(init: PaymentInit) -> Self {
        match init {
            PaymentInit::Ready(cart) => Self::Ready { cart },
            PaymentInit::NoProvider(cart) => Self::NoProvider { cart },
            PaymentInit::Unavailable { cart, error } => Self::Unavailable {
                cart,
                error: error.to_string(),
            },
        }
    }
}

/// Start checkout for the session cart.
#[instrument(skip(state, headers))]
pub async fn start(State(state): State<AppState>, headers: HeaderMap) -> Json<PaymentInitView> {
    let Some(cart_id) = cart_cookie::cart_id(&headers) else {
        return Json(PaymentInitView::Unavailable {
            cart: None,
            error: "no cart for this session".to_string(),
        });
    };

    let init = state.medusa().initialize_payment_session(&cart_id).await;
    Json(PaymentInitView::from(init))
}
