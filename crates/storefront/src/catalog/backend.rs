//! Backend selection.

use super::source::{CatalogSource, CollectionProductsQuery, ProductQuery};
use crate::config::{CatalogMode, StorefrontConfig};
use crate::shopify::types::{Collection, Product};
use crate::shopify::{MockCatalog, MockDataError, ShopifyError, StorefrontClient};

/// The catalog backend chosen at start-up.
#[derive(Clone)]
pub enum Backend {
    Live(StorefrontClient),
    Mock(MockCatalog),
}

impl Backend {
    /// Build the backend named by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if mock mode is on and the fixture cannot be loaded.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, MockDataError> {
        match config.mode {
            CatalogMode::Live => {
                let client = StorefrontClient::new(&config.shopify);
                tracing::info!(endpoint = client.endpoint(), "Using Shopify Storefront API");
                Ok(Self::Live(client))
            }
            CatalogMode::Mock => {
                let mock = MockCatalog::load(config.mock_data_path.as_deref())?;
                tracing::info!(
                    fixture = ?config.mock_data_path,
                    "Using mock catalog data"
                );
                Ok(Self::Mock(mock))
            }
        }
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Live(_) => "shopify",
            Self::Mock(_) => "mock",
        }
    }
}

impl CatalogSource for Backend {
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ShopifyError> {
        match self {
            Self::Live(client) => client.products(query).await,
            Self::Mock(mock) => mock.products(query).await,
        }
    }

    async fn product(&self, handle: &str) -> Result<Product, ShopifyError> {
        match self {
            Self::Live(client) => client.product(handle).await,
            Self::Mock(mock) => mock.product(handle).await,
        }
    }

    async fn collections(&self, first: i64) -> Result<Vec<Collection>, ShopifyError> {
        match self {
            Self::Live(client) => client.collections(first).await,
            Self::Mock(mock) => mock.collections(first).await,
        }
    }

    async fn collection_products(
        &self,
        query: &CollectionProductsQuery,
    ) -> Result<Vec<Product>, ShopifyError> {
        match self {
            Self::Live(client) => client.collection_products(query).await,
            Self::Mock(mock) => mock.collection_products(query).await,
        }
    }
}

