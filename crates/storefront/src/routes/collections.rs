//! Collection route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::shopify::types::Collection;
use crate::state::AppState;

/// List every collection. An unreachable backend lists none.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Collection>> {
    Json(state.catalog().list_collections().await)
}
