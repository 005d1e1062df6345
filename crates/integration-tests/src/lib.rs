//! Integration tests for Joyco.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p joyco-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_routes` - Router tests against the bundled fixture
//! - `shopify_client` - Storefront API client tests against a mock server
//!
//! Nothing here needs network access or credentials.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response};
use joyco_storefront::catalog::{Backend, Catalog};
use joyco_storefront::config::{CatalogMode, StorefrontConfig};
use joyco_storefront::shopify::{MockCatalog, MockDataError};
use joyco_storefront::state::AppState;
use tower::ServiceExt;

/// The storefront router over the bundled fixture.
///
/// # Errors
///
/// Returns an error if the bundled fixture does not parse.
pub fn mock_app() -> Result<Router, MockDataError> {
    let config = StorefrontConfig {
        mode: CatalogMode::Mock,
        ..StorefrontConfig::default()
    };
    let catalog = Catalog::new(Backend::Mock(MockCatalog::bundled()?), config.page_size);
    Ok(joyco_storefront::app(AppState::with_catalog(config, catalog)))
}

/// Send a GET through the router.
///
/// # Panics
///
/// Panics if the URI is invalid or the router fails, both of which are test
/// bugs.
#[allow(clippy::expect_used)]
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri)
        .body(Body::empty())
        .expect("valid request");
    app.oneshot(request).await.expect("router is infallible")
}

/// Collect a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not JSON.
#[allow(clippy::expect_used)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
