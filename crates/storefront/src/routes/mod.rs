//! HTTP route handlers for storefront.
//!
//! Every page is served as JSON: the data a template would render, already
//! filtered, sorted and formatted.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Shop
//! GET  /shop                   - Whole catalog (?sort, ?q, ?fcolor)
//! GET  /shop/:collection       - One collection (same parameters)
//! GET  /collections            - Collection listing
//!
//! # Products
//! GET  /product/:handle        - Product detail
//! ```

pub mod collections;
pub mod products;
pub mod shop;

use axum::{Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Store name used in page titles.
pub const SITE_NAME: &str = "ACME Store";

/// Root of the shop listing.
pub const SHOP_PATH: &str = "/shop";

/// Page title and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

/// One breadcrumb. The current page has no link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub label: String,
    pub href: Option<String>,
}

impl BreadcrumbItem {
    #[must_use]
    pub fn link(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href.to_string()),
        }
    }

    #[must_use]
    pub fn current(label: &str) -> Self {
        Self {
            label: label.to_string(),
            href: None,
        }
    }
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog backend.
pub async fn health() -> &'static str {
    "ok"
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .route("/{collection}", get(shop::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest(SHOP_PATH, shop_routes())
        .route("/collections", get(collections::index))
        .route("/product/{handle}", get(products::show))
}
