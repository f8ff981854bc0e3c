//! Route handlers and router assembly.

pub mod cart;
pub mod checkout;
pub mod collections;
pub mod pages;
pub mod products;

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use tracing::instrument;

use crate::state::AppState;

/// Webhook endpoint dropping cached catalog data, so backend edits show up
/// before the TTL expires.
#[instrument(skip(state))]
async fn revalidate(State(state): State<AppState>) -> &'static str {
    state.medusa().invalidate_all().await;
    "ok"
}

/// Assemble all storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{handle}", get(products::show))
        .route(
            "/products/{handle}/recommendations",
            get(products::recommendations),
        )
        .route("/collections", get(collections::index))
        .route("/collections/{handle}", get(collections::show))
        .route("/collections/{handle}/products", get(collections::products))
        .route("/menu/{handle}", get(collections::menu))
        .route("/cart", get(cart::show))
        .route("/cart/lines", post(cart::add))
        .route("/cart/lines/update", post(cart::update))
        .route("/cart/lines/remove", post(cart::remove))
        .route("/checkout", get(checkout::start))
        .route("/pages", get(pages::index))
        .route("/pages/{handle}", get(pages::show))
        .route("/revalidate", post(revalidate))
}
