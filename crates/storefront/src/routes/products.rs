//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use mero_closet_core::Product;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Free-text search query.
    pub q: Option<String>,
}

/// List the product catalog, optionally filtered by search query.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.medusa().get_products(params.q.as_deref()).await?;
    Ok(Json(products))
}

/// Show a single product by handle.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Product>> {
    state
        .medusa()
        .get_product(&handle)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {handle}")))
}

/// Recommendations for a product.
#[instrument(skip(state))]
pub async fn recommendations(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Vec<Product>>> {
    let Some(product) = state.medusa().get_product(&handle).await? else {
        return Err(AppError::NotFound(format!("product {handle}")));
    };
    let related = state
        .medusa()
        .get_product_recommendations(&product.id)
        .await?;
    Ok(Json(related))
}
