//! Fixture-backed catalog.
//!
//! Serves the catalog from a JSON file holding upstream-shaped products and
//! collections, converted through the same adapter as live responses. The
//! data is read once and never mutated, so clones share it freely.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use joyco_core::{ProductCollectionSortKey, ProductSortKey};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::catalog::{CatalogSource, CollectionProductsQuery, ProductQuery, matches_search};
use crate::shopify::ShopifyError;
use crate::shopify::adapter::{adapt_collection, adapt_product};
use crate::shopify::raw::{RawCollection, RawProduct};
use crate::shopify::types::{Collection, Product};

/// Fixture compiled into the binary, used when no path is configured.
const BUNDLED_FIXTURE: &str = include_str!("../../fixtures/shopify-data.json");

/// Collection whose members are the products flagged `featured`.
const FEATURED_COLLECTION: &str = "featured";

/// Errors loading fixture data.
#[derive(Debug, Error)]
pub enum MockDataError {
    #[error("failed to read mock data from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid mock data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
struct MockData {
    #[serde(default)]
    products: Vec<RawProduct>,
    #[serde(default)]
    collections: Vec<RawCollection>,
}

/// Catalog served from fixture data.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    data: Arc<MockData>,
}

impl MockCatalog {
    /// Load the bundled fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is not valid JSON.
    pub fn bundled() -> Result<Self, MockDataError> {
        Self::from_json(BUNDLED_FIXTURE)
    }

    /// Parse fixture data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the fixture shape.
    pub fn from_json(json: &str) -> Result<Self, MockDataError> {
        let data: MockData = serde_json::from_str(json)?;
        debug!(
            products = data.products.len(),
            collections = data.collections.len(),
            "Mock catalog loaded"
        );
        Ok(Self {
            data: Arc::new(data),
        })
    }

    /// Read fixture data from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, MockDataError> {
        let json = std::fs::read_to_string(path).map_err(|source| MockDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `path` when given, otherwise the bundled fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, MockDataError> {
        path.map_or_else(Self::bundled, Self::from_path)
    }

    #[instrument(skip(self))]
    fn find_products(&self, query: &ProductQuery) -> Vec<Product> {
        let products = self
            .data
            .products
            .iter()
            .filter(|p| search_matches(p, query.search.as_deref()))
            .collect();

        finish(
            products,
            product_order(query.sort.key),
            query.sort.reverse,
            query.first,
        )
    }

    fn find_product(&self, handle: &str) -> Result<Product, ShopifyError> {
        self.data
            .products
            .iter()
            .find(|p| p.handle == handle)
            .cloned()
            .map(adapt_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))
    }

    fn find_collections(&self, first: i64) -> Vec<Collection> {
        self.data
            .collections
            .iter()
            .take(limit(first))
            .cloned()
            .map(adapt_collection)
            .collect()
    }

    #[instrument(skip(self, query), fields(handle = %query.handle))]
    fn find_collection_products(&self, query: &CollectionProductsQuery) -> Vec<Product> {
        if !self.data.collections.iter().any(|c| c.handle == query.handle) {
            debug!("Collection not found");
            return Vec::new();
        }

        let is_featured = query.handle == FEATURED_COLLECTION;
        let products = self
            .data
            .products
            .iter()
            .filter(|p| {
                p.product_type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case(&query.handle))
                    || (is_featured && p.featured)
            })
            .filter(|p| search_matches(p, query.search.as_deref()))
            .collect();

        finish(
            products,
            collection_order(query.sort.key),
            query.sort.reverse,
            query.first,
        )
    }
}

impl CatalogSource for MockCatalog {
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ShopifyError> {
        Ok(self.find_products(query))
    }

    async fn product(&self, handle: &str) -> Result<Product, ShopifyError> {
        self.find_product(handle)
    }

    async fn collections(&self, first: i64) -> Result<Vec<Collection>, ShopifyError> {
        Ok(self.find_collections(first))
    }

    async fn collection_products(
        &self,
        query: &CollectionProductsQuery,
    ) -> Result<Vec<Product>, ShopifyError> {
        Ok(self.find_collection_products(query))
    }
}

/// How the fixture can order products. Keys it cannot emulate keep fixture
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Title,
    Price,
    Fixture,
}

const fn product_order(key: ProductSortKey) -> Order {
    match key {
        ProductSortKey::Title => Order::Title,
        ProductSortKey::Price => Order::Price,
        _ => Order::Fixture,
    }
}

const fn collection_order(key: ProductCollectionSortKey) -> Order {
    match key {
        ProductCollectionSortKey::Title => Order::Title,
        ProductCollectionSortKey::Price => Order::Price,
        _ => Order::Fixture,
    }
}

fn search_matches(product: &RawProduct, search: Option<&str>) -> bool {
    search.is_none_or(|s| matches_search(&product.title, s))
}

fn min_price(product: &RawProduct) -> Decimal {
    product
        .price_range
        .as_ref()
        .and_then(|r| r.min_variant_price.as_ref())
        .and_then(|m| m.amount.as_deref())
        .and_then(|a| a.trim().parse().ok())
        .unwrap_or(Decimal::ZERO)
}

fn compare(a: &RawProduct, b: &RawProduct, order: Order) -> Ordering {
    match order {
        Order::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        Order::Price => min_price(a).cmp(&min_price(b)),
        Order::Fixture => Ordering::Equal,
    }
}

/// Sort, apply direction, truncate, adapt.
fn finish(mut products: Vec<&RawProduct>, order: Order, reverse: bool, first: i64) -> Vec<Product> {
    products.sort_by(|a, b| compare(a, b, order));
    if reverse {
        products.reverse();
    }

    products
        .into_iter()
        .take(limit(first))
        .cloned()
        .map(adapt_product)
        .collect()
}

fn limit(first: i64) -> usize {
    usize::try_from(first).unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use joyco_core::SortSpec;

    use super::*;

    fn catalog() -> MockCatalog {
        MockCatalog::bundled().unwrap()
    }

    fn handles(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.handle.as_str()).collect()
    }

    fn products_query(sort: Option<&str>, search: Option<&str>) -> ProductQuery {
        ProductQuery {
            first: 100,
            sort: SortSpec::for_products(sort),
            search: search.map(str::to_string),
        }
    }

    fn collection_query(handle: &str, sort: Option<&str>) -> CollectionProductsQuery {
        CollectionProductsQuery {
            handle: handle.to_string(),
            first: 100,
            sort: SortSpec::for_collection(sort),
            search: None,
        }
    }

    #[tokio::test]
    async fn test_title_sort() {
        let products = catalog()
            .products(&products_query(Some("title"), None))
            .await
            .unwrap();
        assert_eq!(handles(&products)[..3], ["canvas-tote", "field-jacket", "gift-card"]);

        let products = catalog()
            .products(&products_query(Some("title-desc"), None))
            .await
            .unwrap();
        assert_eq!(handles(&products)[0], "wool-beanie");
    }

    #[tokio::test]
    async fn test_price_sort() {
        let products = catalog()
            .products(&products_query(Some("price-asc"), None))
            .await
            .unwrap();
        assert_eq!(handles(&products)[..2], ["gift-card", "wool-beanie"]);

        let products = catalog()
            .products(&products_query(Some("price-desc"), None))
            .await
            .unwrap();
        assert_eq!(handles(&products)[0], "weekender-duffel");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let products = catalog()
            .products(&products_query(None, Some("SHIRT")))
            .await
            .unwrap();
        assert_eq!(handles(&products), ["oxford-shirt", "linen-shirt"]);
    }

    #[tokio::test]
    async fn test_limit_truncates() {
        let mut query = products_query(None, None);
        query.first = 2;
        let products = catalog().products(&query).await.unwrap();
        assert_eq!(handles(&products), ["field-jacket", "rain-shell"]);
    }

    #[tokio::test]
    async fn test_get_product() {
        let product = catalog().product("canvas-tote").await.unwrap();
        assert_eq!(product.title, "Canvas Tote");
        assert!(product.featured_image.thumbhash.is_some());

        let missing = catalog().product("no-such-thing").await;
        assert!(matches!(missing, Err(ShopifyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_collections() {
        let collections = catalog().collections(100).await.unwrap();
        assert_eq!(collections.len(), 5);
        assert_eq!(collections[1].path, "/shop/jackets");
        assert_eq!(catalog().collections(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_collection_membership_by_product_type() {
        let products = catalog()
            .collection_products(&collection_query("jackets", Some("title")))
            .await
            .unwrap();
        assert_eq!(handles(&products), ["field-jacket", "rain-shell"]);
    }

    #[tokio::test]
    async fn test_featured_collection() {
        let products = catalog()
            .collection_products(&collection_query("featured", None))
            .await
            .unwrap();
        assert_eq!(handles(&products), ["field-jacket", "canvas-tote"]);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let products = catalog()
            .collection_products(&collection_query("hats", None))
            .await
            .unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            MockCatalog::from_json("{not json"),
            Err(MockDataError::Parse(_))
        ));
        let err = MockCatalog::from_path(Path::new("/nonexistent/fixture.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fixture.json"));
    }
}
