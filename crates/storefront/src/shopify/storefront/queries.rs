//! GraphQL operations for the Shopify Storefront API.
//!
//! Each operation is a marker type implementing [`GraphQLQuery`] by hand:
//! the documents are plain constants and responses deserialize straight into
//! the upstream shapes in [`crate::shopify::raw`].

use graphql_client::{GraphQLQuery, QueryBody};
use joyco_core::{ProductCollectionSortKey, ProductSortKey};
use serde::{Deserialize, Serialize};

use crate::shopify::raw::{Connection, RawCollection, RawProduct};

/// Selection set shared by every product query.
macro_rules! product_fields {
    () => {
        r"
    id
    handle
    title
    description
    descriptionHtml
    availableForSale
    tags
    productType
    category {
      id
      name
    }
    seo {
      title
      description
    }
    options {
      id
      name
      values
    }
    images(first: 10) {
      edges {
        node {
          url
          altText
          width
          height
          thumbhash
        }
      }
    }
    priceRange {
      minVariantPrice {
        amount
        currencyCode
      }
    }
    compareAtPriceRange {
      minVariantPrice {
        amount
        currencyCode
      }
    }
    variants(first: 50) {
      edges {
        node {
          id
          title
          availableForSale
          price {
            amount
            currencyCode
          }
          selectedOptions {
            name
            value
          }
        }
      }
    }
"
    };
}

// =============================================================================
// getProducts
// =============================================================================

pub const GET_PRODUCTS: &str = concat!(
    r"query getProducts($first: Int!, $sortKey: ProductSortKeys!, $reverse: Boolean, $query: String) {
  products(first: $first, sortKey: $sortKey, reverse: $reverse, query: $query) {
    edges {
      node {",
    product_fields!(),
    r"      }
    }
  }
}
"
);

pub struct GetProducts;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductsVariables {
    pub first: i64,
    pub sort_key: ProductSortKey,
    pub reverse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetProductsData {
    pub products: Connection<RawProduct>,
}

impl GraphQLQuery for GetProducts {
    type Variables = GetProductsVariables;
    type ResponseData = GetProductsData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: GET_PRODUCTS,
            operation_name: "getProducts",
        }
    }
}

// =============================================================================
// getProduct
// =============================================================================

pub const GET_PRODUCT: &str = concat!(
    r"query getProduct($handle: String!) {
  product(handle: $handle) {",
    product_fields!(),
    r"  }
}
"
);

pub struct GetProduct;

#[derive(Debug, Clone, Serialize)]
pub struct GetProductVariables {
    pub handle: String,
}

#[derive(Debug, Deserialize)]
pub struct GetProductData {
    pub product: Option<RawProduct>,
}

impl GraphQLQuery for GetProduct {
    type Variables = GetProductVariables;
    type ResponseData = GetProductData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: GET_PRODUCT,
            operation_name: "getProduct",
        }
    }
}

// =============================================================================
// getCollections
// =============================================================================

pub const GET_COLLECTIONS: &str = r"query getCollections($first: Int!) {
  collections(first: $first) {
    edges {
      node {
        id
        handle
        title
        description
        seo {
          title
          description
        }
        image {
          url
          altText
          width
          height
          thumbhash
        }
      }
    }
  }
}
";

pub struct GetCollections;

#[derive(Debug, Clone, Serialize)]
pub struct GetCollectionsVariables {
    pub first: i64,
}

#[derive(Debug, Deserialize)]
pub struct GetCollectionsData {
    pub collections: Connection<RawCollection>,
}

impl GraphQLQuery for GetCollections {
    type Variables = GetCollectionsVariables;
    type ResponseData = GetCollectionsData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: GET_COLLECTIONS,
            operation_name: "getCollections",
        }
    }
}

// =============================================================================
// getCollectionProducts
// =============================================================================

pub const GET_COLLECTION_PRODUCTS: &str = concat!(
    r"query getCollectionProducts($handle: String!, $first: Int!, $sortKey: ProductCollectionSortKeys!, $reverse: Boolean) {
  collection(handle: $handle) {
    products(first: $first, sortKey: $sortKey, reverse: $reverse) {
      edges {
        node {",
    product_fields!(),
    r"        }
      }
    }
  }
}
"
);

pub struct GetCollectionProducts;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCollectionProductsVariables {
    pub handle: String,
    pub first: i64,
    pub sort_key: ProductCollectionSortKey,
    pub reverse: bool,
}

#[derive(Debug, Deserialize)]
pub struct CollectionProducts {
    pub products: Connection<RawProduct>,
}

#[derive(Debug, Deserialize)]
pub struct GetCollectionProductsData {
    pub collection: Option<CollectionProducts>,
}

impl GraphQLQuery for GetCollectionProducts {
    type Variables = GetCollectionProductsVariables;
    type ResponseData = GetCollectionProductsData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: GET_COLLECTION_PRODUCTS,
            operation_name: "getCollectionProducts",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_products_request_body() {
        let body = GetProducts::build_query(GetProductsVariables {
            first: 24,
            sort_key: ProductSortKey::Price,
            reverse: true,
            query: None,
        });
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["operationName"], "getProducts");
        assert_eq!(json["variables"]["sortKey"], "PRICE");
        assert_eq!(json["variables"]["first"], 24);
        assert!(json["variables"].get("query").is_none());
    }

    #[test]
    fn test_documents_embed_product_fields() {
        for document in [GET_PRODUCTS, GET_PRODUCT, GET_COLLECTION_PRODUCTS] {
            assert!(document.contains("compareAtPriceRange"));
            assert!(document.contains("selectedOptions"));
            assert_eq!(
                document.matches('{').count(),
                document.matches('}').count()
            );
        }
        assert!(GET_COLLECTION_PRODUCTS.contains("ProductCollectionSortKeys!"));
    }

    #[test]
    fn test_collection_products_missing_collection() {
        let data: GetCollectionProductsData =
            serde_json::from_str(r#"{"collection": null}"#).unwrap();
        assert!(data.collection.is_none());
    }
}
