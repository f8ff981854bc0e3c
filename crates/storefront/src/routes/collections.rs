//! Collection and menu route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use mero_closet_core::{Collection, Menu, Product};

use crate::content;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// List all storefront collections.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Collection>>> {
    Ok(Json(state.medusa().get_collections().await?))
}

/// Show a single collection by handle.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Collection>> {
    state
        .medusa()
        .get_collection(&handle)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("collection {handle}")))
}

/// Query parameters for collection product listings.
#[derive(Debug, Deserialize)]
pub struct CollectionProductsQuery {
    /// Free-text search query.
    pub q: Option<String>,
}

/// List the products of a collection.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(params): Query<CollectionProductsQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state
        .medusa()
        .get_collection_products(&handle, params.q.as_deref())
        .await?;
    Ok(Json(products))
}

/// Navigation menu assembled from the collections.
#[instrument(skip(state))]
pub async fn menu(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Vec<Menu>>> {
    let collections = state.medusa().get_collections().await?;
    Ok(Json(content::build_menu(&collections, &handle)))
}
