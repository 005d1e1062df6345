//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` for the request/response envelope with `reqwest`
//! 0.13 for HTTP. Catalog listings and products are cached using `moka`
//! with the TTL from configuration.

mod cache;
pub mod queries;

use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use tracing::{debug, instrument};

use crate::catalog::{CatalogSource, CollectionProductsQuery, ProductQuery, matches_search};
use crate::config::ShopifyStorefrontConfig;
use crate::shopify::adapter::{adapt_collection, adapt_product};
use crate::shopify::types::{Collection, Product};
use crate::shopify::{GraphQLError, ShopifyError};

use cache::{CacheKey, CacheValue};
use queries::{
    GetCollectionProducts, GetCollectionProductsVariables, GetCollections,
    GetCollectionsVariables, GetProduct, GetProductVariables, GetProducts, GetProductsVariables,
};

/// Header carrying the server-side Storefront access token.
const PRIVATE_TOKEN_HEADER: &str = "Shopify-Storefront-Private-Token";

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
    cache: Cache<CacheKey, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client for the configured store.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        Self::with_endpoint(config, config.endpoint())
    }

    /// Create a client that posts to an explicit GraphQL endpoint.
    #[must_use]
    pub fn with_endpoint(config: &ShopifyStorefrontConfig, endpoint: impl Into<String>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: endpoint.into(),
                access_token: config.private_token().map(str::to_string),
                cache,
            }),
        }
    }

    /// The GraphQL endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);

        let mut request = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("Content-Type", "application/json");
        if let Some(token) = &self.inner.access_token {
            request = request.header(PRIVATE_TOKEN_HEADER, token);
        }

        let response = request.json(&request_body).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation = request_body.operation_name,
                body = %truncate(&response_text, 500),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::graphql(format!(
                "HTTP {status}: {}",
                truncate(&response_text, 200)
            )));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    operation = request_body.operation_name,
                    body = %truncate(&response_text, 500),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(GraphQLError::from).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = request_body.operation_name,
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::graphql("No data in response")
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` if no product has this handle, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product(&self, handle: &str) -> Result<Product, ShopifyError> {
        let cache_key = CacheKey::Product(handle.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let data = self
            .execute::<GetProduct>(GetProductVariables {
                handle: handle.to_string(),
            })
            .await?;

        let product = data
            .product
            .map(adapt_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get products across the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(sort_key = query.sort.key.as_str(), reverse = query.sort.reverse))]
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ShopifyError> {
        let cache_key = CacheKey::Products {
            first: query.first,
            sort_key: query.sort.key,
            reverse: query.sort.reverse,
        };

        // Only default listings are cached, never searches
        if query.search.is_none()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let data = self
            .execute::<GetProducts>(GetProductsVariables {
                first: query.first,
                sort_key: query.sort.key,
                reverse: query.sort.reverse,
                query: query.search.clone(),
            })
            .await?;

        let products: Vec<Product> = data
            .products
            .into_nodes()
            .into_iter()
            .map(adapt_product)
            .collect();

        if query.search.is_none() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(products.clone()))
                .await;
        }

        Ok(products)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get the store's collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(&self, first: i64) -> Result<Vec<Collection>, ShopifyError> {
        let cache_key = CacheKey::Collections { first };

        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let data = self
            .execute::<GetCollections>(GetCollectionsVariables { first })
            .await?;

        let collections: Vec<Collection> = data
            .collections
            .into_nodes()
            .into_iter()
            .map(adapt_collection)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(collections.clone()))
            .await;

        Ok(collections)
    }

    /// Get the products of one collection.
    ///
    /// An unknown collection yields an empty list. The collection connection
    /// has no search argument, so a search term filters titles after the
    /// fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, query), fields(handle = %query.handle, sort_key = query.sort.key.as_str()))]
    pub async fn get_collection_products(
        &self,
        query: &CollectionProductsQuery,
    ) -> Result<Vec<Product>, ShopifyError> {
        let cache_key = CacheKey::CollectionProducts {
            handle: query.handle.clone(),
            first: query.first,
            sort_key: query.sort.key,
            reverse: query.sort.reverse,
        };

        let products = if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collection products");
            products
        } else {
            let data = self
                .execute::<GetCollectionProducts>(GetCollectionProductsVariables {
                    handle: query.handle.clone(),
                    first: query.first,
                    sort_key: query.sort.key,
                    reverse: query.sort.reverse,
                })
                .await?;

            let Some(collection) = data.collection else {
                debug!("Collection not found");
                return Ok(Vec::new());
            };

            let products: Vec<Product> = collection
                .products
                .into_nodes()
                .into_iter()
                .map(adapt_product)
                .collect();

            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(products.clone()))
                .await;
            products
        };

        Ok(match query.search.as_deref() {
            Some(search) => products
                .into_iter()
                .filter(|p| matches_search(&p.title, search))
                .collect(),
            None => products,
        })
    }
}

impl CatalogSource for StorefrontClient {
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ShopifyError> {
        self.get_products(query).await
    }

    async fn product(&self, handle: &str) -> Result<Product, ShopifyError> {
        self.get_product(handle).await
    }

    async fn collections(&self, first: i64) -> Result<Vec<Collection>, ShopifyError> {
        self.get_collections(first).await
    }

    async fn collection_products(
        &self,
        query: &CollectionProductsQuery,
    ) -> Result<Vec<Product>, ShopifyError> {
        self.get_collection_products(query).await
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
