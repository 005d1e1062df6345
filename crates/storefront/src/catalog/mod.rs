//! Catalog facade.
//!
//! [`Catalog`] is what routes and the CLI talk to. It wraps the backend
//! chosen at start-up and never returns an error: a failed read is logged
//! and becomes an empty list or `None`, so a broken upstream renders an
//! empty shop instead of an error page.

mod backend;
mod source;

pub use backend::Backend;
pub use source::{CatalogSource, CollectionProductsQuery, ProductQuery, matches_search};

use joyco_core::{ProductCollectionSortKey, ProductSortKey, SortSpec};
use tracing::{debug, error, instrument};

use crate::shopify::ShopifyError;
use crate::shopify::types::{Collection, Product};

/// Infallible catalog reads over a [`CatalogSource`].
#[derive(Clone)]
pub struct Catalog<S = Backend> {
    source: S,
    page_size: i64,
}

impl<S: CatalogSource> Catalog<S> {
    /// Wrap a source. `page_size` bounds every listing.
    pub const fn new(source: S, page_size: i64) -> Self {
        Self { source, page_size }
    }

    /// The wrapped source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// List products across the whole catalog.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        sort: SortSpec<ProductSortKey>,
        search: Option<&str>,
    ) -> Vec<Product> {
        let query = ProductQuery {
            first: self.page_size,
            sort,
            search: normalize_search(search),
        };

        self.source
            .products(&query)
            .await
            .unwrap_or_else(|e| log_failure("list_products", &e))
    }

    /// Fetch one product by handle.
    #[instrument(skip(self))]
    pub async fn get_product(&self, handle: &str) -> Option<Product> {
        match self.source.product(handle).await {
            Ok(product) => Some(product),
            Err(ShopifyError::NotFound(_)) => {
                debug!("Product not found");
                None
            }
            Err(e) => {
                error!(error = %e, operation = "get_product", "Catalog request failed");
                None
            }
        }
    }

    /// List all collections.
    #[instrument(skip(self))]
    pub async fn list_collections(&self) -> Vec<Collection> {
        self.source
            .collections(self.page_size)
            .await
            .unwrap_or_else(|e| log_failure("list_collections", &e))
    }

    /// Find a collection by handle.
    ///
    /// There is no single-collection read upstream; this scans the listing.
    #[instrument(skip(self))]
    pub async fn get_collection(&self, handle: &str) -> Option<Collection> {
        self.list_collections()
            .await
            .into_iter()
            .find(|c| c.handle == handle)
    }

    /// List the products of a collection. Unknown collections are empty.
    #[instrument(skip(self))]
    pub async fn list_collection_products(
        &self,
        handle: &str,
        sort: SortSpec<ProductCollectionSortKey>,
        search: Option<&str>,
    ) -> Vec<Product> {
        let query = CollectionProductsQuery {
            handle: handle.to_string(),
            first: self.page_size,
            sort,
            search: normalize_search(search),
        };

        self.source
            .collection_products(&query)
            .await
            .unwrap_or_else(|e| log_failure("list_collection_products", &e))
    }
}

fn log_failure<T>(operation: &'static str, e: &ShopifyError) -> Vec<T> {
    error!(error = %e, operation, "Catalog request failed");
    Vec::new()
}

fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::shopify::MockCatalog;

    /// Source that fails every call and records what it was asked.
    #[derive(Default)]
    struct FailingSource {
        seen_search: Mutex<Vec<Option<String>>>,
    }

    impl CatalogSource for FailingSource {
        async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ShopifyError> {
            self.seen_search.lock().unwrap().push(query.search.clone());
            Err(ShopifyError::RateLimited(2))
        }

        async fn product(&self, _handle: &str) -> Result<Product, ShopifyError> {
            Err(ShopifyError::graphql("boom"))
        }

        async fn collections(&self, _first: i64) -> Result<Vec<Collection>, ShopifyError> {
            Err(ShopifyError::graphql("boom"))
        }

        async fn collection_products(
            &self,
            _query: &CollectionProductsQuery,
        ) -> Result<Vec<Product>, ShopifyError> {
            Err(ShopifyError::graphql("boom"))
        }
    }

    #[tokio::test]
    async fn test_failures_become_empty() {
        let catalog = Catalog::new(FailingSource::default(), 10);

        assert!(
            catalog
                .list_products(SortSpec::default(), None)
                .await
                .is_empty()
        );
        assert!(catalog.get_product("anything").await.is_none());
        assert!(catalog.list_collections().await.is_empty());
        assert!(catalog.get_collection("jackets").await.is_none());
        assert!(
            catalog
                .list_collection_products("jackets", SortSpec::default(), None)
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_blank_search_is_dropped() {
        let catalog = Catalog::new(FailingSource::default(), 10);
        catalog.list_products(SortSpec::default(), Some("   ")).await;
        catalog.list_products(SortSpec::default(), Some(" tee ")).await;

        let seen = catalog.source().seen_search.lock().unwrap().clone();
        assert_eq!(seen, [None, Some("tee".to_string())]);
    }

    #[tokio::test]
    async fn test_get_collection_scans_listing() {
        let catalog = Catalog::new(MockCatalog::bundled().unwrap(), 100);

        let collection = catalog.get_collection("bags").await.unwrap();
        assert_eq!(collection.title, "Bags");
        assert!(catalog.get_collection("hats").await.is_none());
    }

    #[tokio::test]
    async fn test_page_size_bounds_listings() {
        let catalog = Catalog::new(MockCatalog::bundled().unwrap(), 3);
        assert_eq!(catalog.list_products(SortSpec::default(), None).await.len(), 3);
        assert_eq!(catalog.list_collections().await.len(), 3);
    }
}
