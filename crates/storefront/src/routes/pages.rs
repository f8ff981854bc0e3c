//! Static content page handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use mero_closet_core::Page;

use crate::content;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// List all static pages.
#[instrument(skip(_state))]
pub async fn index(State(_state): State<AppState>) -> Json<Vec<Page>> {
    Json(content::pages())
}

/// Show a static page by handle.
#[instrument(skip(_state))]
pub async fn show(
    State(_state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Page>> {
    content::page(&handle)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("page {handle}")))
}
