//! Cache types for Storefront API responses.

use joyco_core::{ProductCollectionSortKey, ProductSortKey};

use crate::shopify::types::{Collection, Product};

/// Cache key for products and collections.
///
/// Free-text searches are never cached, so no key carries a search term.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Products {
        first: i64,
        sort_key: ProductSortKey,
        reverse: bool,
    },
    Collections {
        first: i64,
    },
    CollectionProducts {
        handle: String,
        first: i64,
        sort_key: ProductCollectionSortKey,
        reverse: bool,
    },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Collections(Vec<Collection>),
}
