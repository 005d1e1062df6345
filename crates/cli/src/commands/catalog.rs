//! Catalog read commands.
//!
//! Each command runs one catalog operation against the configured backend
//! and writes the adapted result to stdout as pretty JSON.
//!
//! # Usage
//!
//! ```bash
//! # List products sorted by price, highest first
//! joyco products --sort price-desc
//!
//! # One product
//! joyco product field-jacket
//!
//! # A collection's products matching "shell"
//! joyco collection-products jackets --query shell
//!
//! # The assembled shop page for a collection and filter
//! joyco --mock shop jackets --filter "fcolor=Olive"
//! ```
//!
//! # Environment Variables
//!
//! Same as the storefront: `STOREFRONT_USE_MOCKS`, `STOREFRONT_MOCK_DATA`,
//! `SHOPIFY_STORE_DOMAIN`, `SHOPIFY_STOREFRONT_PRIVATE_TOKEN`, ...

use std::io::Write;
use std::path::PathBuf;

use joyco_core::{CatalogView, SortSpec};
use joyco_storefront::catalog::{Backend, Catalog};
use joyco_storefront::config::{CatalogMode, ConfigError, StorefrontConfig};
use joyco_storefront::routes::shop::{ShopPage, load_session, settle_location};
use joyco_storefront::shop::{FilterState, QueryError};
use joyco_storefront::shopify::MockDataError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur running a catalog command.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fixture data could not be loaded.
    #[error(transparent)]
    MockData(#[from] MockDataError),

    /// The requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The filter string did not parse.
    #[error("Invalid filter: {0}")]
    Filter(#[from] QueryError),

    /// Writing the output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Backend overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct BackendArgs {
    /// Force the fixture backend.
    pub mock: bool,
    /// Fixture file, implies `mock`.
    pub mock_data: Option<PathBuf>,
    /// Page size override.
    pub limit: Option<i64>,
}

impl BackendArgs {
    /// Apply the overrides to a loaded configuration.
    #[must_use]
    pub fn apply(&self, mut config: StorefrontConfig) -> StorefrontConfig {
        if self.mock || self.mock_data.is_some() {
            config.mode = CatalogMode::Mock;
        }
        if let Some(path) = &self.mock_data {
            config.mock_data_path = Some(path.clone());
        }
        if let Some(limit) = self.limit {
            config.page_size = limit;
        }
        config
    }

    fn catalog(&self) -> Result<Catalog, CatalogCommandError> {
        let config = self.apply(StorefrontConfig::from_env()?);
        let backend = Backend::from_config(&config)?;
        tracing::debug!(backend = backend.name(), "Catalog backend selected");
        Ok(Catalog::new(backend, config.page_size))
    }
}

/// `products`: list the whole catalog.
pub async fn products(
    args: &BackendArgs,
    sort: Option<&str>,
    query: Option<&str>,
) -> Result<(), CatalogCommandError> {
    let catalog = args.catalog()?;
    let products = catalog
        .list_products(SortSpec::for_products(sort), query)
        .await;
    tracing::info!(count = products.len(), "Listed products");
    write_json(&mut std::io::stdout().lock(), &products)
}

/// `product`: one product by handle.
pub async fn product(args: &BackendArgs, handle: &str) -> Result<(), CatalogCommandError> {
    let catalog = args.catalog()?;
    let product = catalog
        .get_product(handle)
        .await
        .ok_or_else(|| CatalogCommandError::NotFound(format!("product {handle}")))?;
    write_json(&mut std::io::stdout().lock(), &product)
}

/// `collections`: every collection.
pub async fn collections(args: &BackendArgs) -> Result<(), CatalogCommandError> {
    let collections = args.catalog()?.list_collections().await;
    tracing::info!(count = collections.len(), "Listed collections");
    write_json(&mut std::io::stdout().lock(), &collections)
}

/// `collection-products`: the products of one collection.
pub async fn collection_products(
    args: &BackendArgs,
    collection: &str,
    sort: Option<&str>,
    query: Option<&str>,
) -> Result<(), CatalogCommandError> {
    let catalog = args.catalog()?;
    let products = catalog
        .list_collection_products(collection, SortSpec::for_collection(sort), query)
        .await;
    tracing::info!(collection, count = products.len(), "Listed collection products");
    write_json(&mut std::io::stdout().lock(), &products)
}

/// `shop`: the assembled shop page for a view and query string.
///
/// Unavailable colours are dropped with a warning instead of a redirect.
pub async fn shop(
    args: &BackendArgs,
    collection: Option<&str>,
    filter: &str,
) -> Result<(), CatalogCommandError> {
    let catalog = args.catalog()?;
    let filter = FilterState::from_query(filter)?;
    let view = CatalogView::from_segment(collection);

    let (mut session, collections) = load_session(&catalog, view, filter).await;
    if let Some(location) = settle_location(&mut session) {
        tracing::warn!(healed = %location, "Dropped colours not offered by any product");
    }

    write_json(
        &mut std::io::stdout().lock(),
        &ShopPage::new(&session, &collections),
    )
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), CatalogCommandError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_data_implies_mock_mode() {
        let args = BackendArgs {
            mock_data: Some(PathBuf::from("fixtures/alt.json")),
            limit: Some(5),
            ..BackendArgs::default()
        };
        let config = args.apply(StorefrontConfig::default());

        assert_eq!(config.mode, CatalogMode::Mock);
        assert_eq!(config.mock_data_path, Some(PathBuf::from("fixtures/alt.json")));
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = BackendArgs::default().apply(StorefrontConfig::default());
        assert_eq!(config.mode, CatalogMode::Live);
        assert_eq!(config.page_size, StorefrontConfig::default().page_size);
    }

    #[test]
    fn test_write_json_appends_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({"handle": "field-jacket"})).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"handle\": \"field-jacket\""));
    }
}
