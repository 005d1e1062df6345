//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Backend, Catalog};
use crate::config::StorefrontConfig;
use crate::shopify::MockDataError;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog backend is chosen
/// once, here, and every handler reads through the same [`Catalog`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create application state with the backend named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if mock mode is on and the fixture cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self, MockDataError> {
        let backend = Backend::from_config(&config)?;
        tracing::info!(backend = backend.name(), "Catalog backend selected");

        let catalog = Catalog::new(backend, config.page_size);
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state around an existing catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
