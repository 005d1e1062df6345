//! The read interface every catalog backend implements.

use std::future::Future;

use joyco_core::{ProductCollectionSortKey, ProductSortKey, SortSpec};

use crate::shopify::ShopifyError;
use crate::shopify::types::{Collection, Product};

/// Whole-catalog listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Maximum number of products returned.
    pub first: i64,
    pub sort: SortSpec<ProductSortKey>,
    /// Free-text title search.
    pub search: Option<String>,
}

/// Collection listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionProductsQuery {
    /// Collection handle.
    pub handle: String,
    /// Maximum number of products returned.
    pub first: i64,
    pub sort: SortSpec<ProductCollectionSortKey>,
    /// Free-text title search.
    pub search: Option<String>,
}

/// Read operations over a product catalog.
///
/// Implemented by the live Storefront API client and the fixture-backed mock.
/// Errors propagate here; [`super::Catalog`] decides what callers see.
pub trait CatalogSource: Send + Sync {
    /// List products across the whole catalog.
    fn products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<Vec<Product>, ShopifyError>> + Send;

    /// Fetch one product. Unknown handles are `ShopifyError::NotFound`.
    fn product(&self, handle: &str) -> impl Future<Output = Result<Product, ShopifyError>> + Send;

    /// List collections.
    fn collections(
        &self,
        first: i64,
    ) -> impl Future<Output = Result<Vec<Collection>, ShopifyError>> + Send;

    /// List the products of one collection. Unknown collections are empty.
    fn collection_products(
        &self,
        query: &CollectionProductsQuery,
    ) -> impl Future<Output = Result<Vec<Product>, ShopifyError>> + Send;
}

/// Case-insensitive substring match of a search term against a title.
///
/// A blank term matches everything.
#[must_use]
pub fn matches_search(title: &str, search: &str) -> bool {
    let search = search.trim();
    search.is_empty() || title.to_lowercase().contains(&search.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_search() {
        assert!(matches_search("Oxford Shirt", "shirt"));
        assert!(matches_search("Oxford Shirt", "  OXF "));
        assert!(matches_search("Oxford Shirt", ""));
        assert!(!matches_search("Oxford Shirt", "linen"));
    }
}
