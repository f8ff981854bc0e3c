//! Cart route handlers.
//!
//! The `cartId` cookie is the session identifier; it is written when a cart
//! is first created and read on every cart operation. Mutation endpoints
//! return a structured partial result: the backend accepts one line item per
//! request, so a failure midway leaves earlier steps applied, and the caller
//! needs to see which ones.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mero_closet_core::{Cart, CartLineInput, CartLineUpdateInput};

use crate::error::Result;
use crate::medusa::{CartMutation, CartStepFailure};
use crate::middleware::cart_cookie;
use crate::state::AppState;

/// A failed mutation step, for the response body.
#[derive(Debug, Serialize)]
pub struct CartStepFailureView {
    /// Input id of the failing step.
    pub id: String,
    /// Why it failed.
    pub error: String,
}

impl From<&CartStepFailure> for CartStepFailureView {
    fn from(failure: &CartStepFailure) -> Self {
        Self {
            id: failure.id.clone(),
            error: failure.error.to_string(),
        }
    }
}

/// Mutation outcome returned by the cart endpoints.
#[derive(Debug, Serialize)]
pub struct CartMutationView {
    /// Cart state after the last applied step.
    pub cart: Option<Cart>,
    /// Input ids applied, in order.
    pub applied: Vec<String>,
    /// First failing step, when the mutation did not fully apply.
    pub failed: Option<CartStepFailureView>,
}

impl From<&CartMutation> for CartMutationView {
    fn from(mutation: &CartMutation) -> Self {
        Self {
            cart: mutation.cart.clone(),
            applied: mutation.applied.clone(),
            failed: mutation.failed.as_ref().map(CartStepFailureView::from),
        }
    }
}

impl CartMutationView {
    fn empty() -> Self {
        Self {
            cart: None,
            applied: Vec::new(),
            failed: None,
        }
    }
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub lines: Vec<CartLineInput>,
}

/// Update-cart request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub lines: Vec<CartLineUpdateInput>,
}

/// Remove-from-cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub line_ids: Vec<String>,
}

/// Show the session cart, or `null` when there is none.
#[instrument(skip(state, headers))]
pub async fn show(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Option<Cart>>> {
    let Some(cart_id) = cart_cookie::cart_id(&headers) else {
        return Ok(Json(None));
    };
    Ok(Json(state.medusa().get_cart(&cart_id).await?))
}

/// Add lines to the session cart, creating a cart (and its cookie) when the
/// session has none.
#[instrument(skip(state, headers, request))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddToCartRequest>,
) -> Response {
    let existing = cart_cookie::cart_id(&headers);
    let mutation = state
        .medusa()
        .add_to_cart(existing.as_deref(), &request.lines)
        .await;

    let view = CartMutationView::from(&mutation);

    // Persist the id of a newly created cart.
    if existing.is_none()
        && let Some(cart_id) = &mutation.cart_id
    {
        let cookie = cart_cookie::set_cart_cookie(cart_id);
        return (AppendHeaders([(header::SET_COOKIE, cookie)]), Json(view)).into_response();
    }

    Json(view).into_response()
}

/// Update line quantities in the session cart.
#[instrument(skip(state, headers, request))]
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateCartRequest>,
) -> Json<CartMutationView> {
    let Some(cart_id) = cart_cookie::cart_id(&headers) else {
        return Json(CartMutationView::empty());
    };
    let mutation = state.medusa().update_cart(&cart_id, &request.lines).await;
    Json(CartMutationView::from(&mutation))
}

/// Remove lines from the session cart.
#[instrument(skip(state, headers, request))]
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RemoveFromCartRequest>,
) -> Json<CartMutationView> {
    let Some(cart_id) = cart_cookie::cart_id(&headers) else {
        return Json(CartMutationView::empty());
    };
    let mutation = state
        .medusa()
        .remove_from_cart(&cart_id, &request.line_ids)
        .await;
    Json(CartMutationView::from(&mutation))
}
