//! Sort options for catalog listings.
//!
//! The shop exposes one `sort` URL parameter. Its value is looked up in
//! [`SORT_OPTIONS`] and mapped to the sort key enum of whichever listing is
//! being fetched: the whole catalog uses [`ProductSortKey`], a collection uses
//! [`ProductCollectionSortKey`].

use serde::{Deserialize, Serialize};

/// Sort keys accepted by the `products` connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKey {
    Title,
    ProductType,
    Vendor,
    UpdatedAt,
    CreatedAt,
    BestSelling,
    Price,
    Id,
    #[default]
    Relevance,
}

impl ProductSortKey {
    /// GraphQL enum literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::ProductType => "PRODUCT_TYPE",
            Self::Vendor => "VENDOR",
            Self::UpdatedAt => "UPDATED_AT",
            Self::CreatedAt => "CREATED_AT",
            Self::BestSelling => "BEST_SELLING",
            Self::Price => "PRICE",
            Self::Id => "ID",
            Self::Relevance => "RELEVANCE",
        }
    }
}

/// Sort keys accepted by a collection's `products` connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCollectionSortKey {
    Title,
    Price,
    BestSelling,
    Created,
    Id,
    Manual,
    #[default]
    CollectionDefault,
    Relevance,
}

impl ProductCollectionSortKey {
    /// GraphQL enum literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::Price => "PRICE",
            Self::BestSelling => "BEST_SELLING",
            Self::Created => "CREATED",
            Self::Id => "ID",
            Self::Manual => "MANUAL",
            Self::CollectionDefault => "COLLECTION_DEFAULT",
            Self::Relevance => "RELEVANCE",
        }
    }
}

/// What a sort option orders by, independent of the listing kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Relevance,
    Title,
    Price,
    Created,
    BestSelling,
}

/// An entry in the sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortOption {
    /// Value written to the `sort` URL parameter.
    pub value: &'static str,
    /// Human readable label.
    pub label: &'static str,
    /// Other accepted spellings of `value`.
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    #[serde(skip)]
    pub field: SortField,
    #[serde(skip)]
    pub reverse: bool,
}

/// Sort dropdown entries, in display order.
pub const SORT_OPTIONS: &[SortOption] = &[
    SortOption {
        value: "relevance",
        label: "Relevance",
        aliases: &[],
        field: SortField::Relevance,
        reverse: false,
    },
    SortOption {
        value: "title",
        label: "Name: A-Z",
        aliases: &["title-asc"],
        field: SortField::Title,
        reverse: false,
    },
    SortOption {
        value: "title-desc",
        label: "Name: Z-A",
        aliases: &[],
        field: SortField::Title,
        reverse: true,
    },
    SortOption {
        value: "price-asc",
        label: "Price: Low to high",
        aliases: &["price-low-to-high"],
        field: SortField::Price,
        reverse: false,
    },
    SortOption {
        value: "price-desc",
        label: "Price: High to low",
        aliases: &["price-high-to-low"],
        field: SortField::Price,
        reverse: true,
    },
    SortOption {
        value: "newest",
        label: "Newest",
        aliases: &[],
        field: SortField::Created,
        reverse: true,
    },
    SortOption {
        value: "oldest",
        label: "Oldest",
        aliases: &[],
        field: SortField::Created,
        reverse: false,
    },
    SortOption {
        value: "best-selling",
        label: "Best selling",
        aliases: &[],
        field: SortField::BestSelling,
        reverse: false,
    },
];

impl SortOption {
    /// Find the option for a `sort` parameter value (case-insensitive).
    #[must_use]
    pub fn lookup(value: &str) -> Option<&'static Self> {
        let value = value.trim();
        SORT_OPTIONS.iter().find(|opt| {
            opt.value.eq_ignore_ascii_case(value)
                || opt.aliases.iter().any(|a| a.eq_ignore_ascii_case(value))
        })
    }
}

/// A resolved sort key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec<K> {
    pub key: K,
    pub reverse: bool,
}

impl SortSpec<ProductSortKey> {
    /// Resolve the `sort` parameter for the whole-catalog listing.
    ///
    /// Unknown or absent values fall back to relevance order.
    #[must_use]
    pub fn for_products(sort: Option<&str>) -> Self {
        let Some(option) = sort.and_then(SortOption::lookup) else {
            return Self::default();
        };
        let key = match option.field {
            SortField::Relevance => ProductSortKey::Relevance,
            SortField::Title => ProductSortKey::Title,
            SortField::Price => ProductSortKey::Price,
            SortField::Created => ProductSortKey::CreatedAt,
            SortField::BestSelling => ProductSortKey::BestSelling,
        };
        Self {
            key,
            reverse: option.reverse,
        }
    }
}

impl SortSpec<ProductCollectionSortKey> {
    /// Resolve the `sort` parameter for a collection listing.
    ///
    /// Unknown or absent values fall back to the collection's own order.
    #[must_use]
    pub fn for_collection(sort: Option<&str>) -> Self {
        let Some(option) = sort.and_then(SortOption::lookup) else {
            return Self::default();
        };
        let key = match option.field {
            SortField::Relevance => ProductCollectionSortKey::CollectionDefault,
            SortField::Title => ProductCollectionSortKey::Title,
            SortField::Price => ProductCollectionSortKey::Price,
            SortField::Created => ProductCollectionSortKey::Created,
            SortField::BestSelling => ProductCollectionSortKey::BestSelling,
        };
        Self {
            key,
            reverse: option.reverse,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_accepts_aliases() {
        assert_eq!(SortOption::lookup("title-asc").map(|o| o.value), Some("title"));
        assert_eq!(
            SortOption::lookup("price-high-to-low").map(|o| o.value),
            Some("price-desc")
        );
        assert!(SortOption::lookup("popularity").is_none());
    }

    #[test]
    fn test_products_sort_mapping() {
        let spec = SortSpec::for_products(Some("title"));
        assert_eq!(spec.key, ProductSortKey::Title);
        assert!(!spec.reverse);

        let spec = SortSpec::for_products(Some("newest"));
        assert_eq!(spec.key, ProductSortKey::CreatedAt);
        assert!(spec.reverse);
    }

    #[test]
    fn test_collection_sort_mapping() {
        let spec = SortSpec::for_collection(Some("newest"));
        assert_eq!(spec.key, ProductCollectionSortKey::Created);
        assert!(spec.reverse);

        let spec = SortSpec::for_collection(Some("relevance"));
        assert_eq!(spec.key, ProductCollectionSortKey::CollectionDefault);
    }

    #[test]
    fn test_unknown_sort_falls_back() {
        assert_eq!(SortSpec::for_products(Some("nope")), SortSpec::default());
        assert_eq!(
            SortSpec::for_collection(None).key,
            ProductCollectionSortKey::CollectionDefault
        );
    }

    #[test]
    fn test_sort_keys_serialize_as_graphql_enums() {
        assert_eq!(
            serde_json::to_value(ProductSortKey::BestSelling).unwrap(),
            "BEST_SELLING"
        );
        assert_eq!(
            serde_json::to_value(ProductCollectionSortKey::CollectionDefault).unwrap(),
            ProductCollectionSortKey::CollectionDefault.as_str()
        );
    }
}
