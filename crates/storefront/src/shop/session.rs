//! State for assembling one shop page.

use joyco_core::{CatalogView, Swatch};
use tracing::debug;

use crate::shop::colors::{available_colors, retain_available, selected_colors};
use crate::shop::products::ProductsState;
use crate::shop::query::FilterState;
use crate::shopify::types::Product;

/// One shop page being assembled: the view, its URL filter state and the
/// products fetched for it.
#[derive(Debug, Clone)]
pub struct ShopSession {
    view: CatalogView,
    filter: FilterState,
    products: ProductsState,
    available: Vec<Swatch>,
}

impl ShopSession {
    #[must_use]
    pub fn new(view: CatalogView, filter: FilterState) -> Self {
        Self {
            view,
            filter,
            products: ProductsState::default(),
            available: Vec::new(),
        }
    }

    /// Take a fresh fetch. Available colours come from the whole fetch, not
    /// the filtered list, so selecting a colour never hides the others.
    pub fn load(&mut self, products: Vec<Product>) {
        self.products.replace(products, &self.filter.colors);
        self.available = available_colors(self.products.original());
    }

    /// Drop selected colours that no loaded product offers.
    ///
    /// Returns the healed filter state when anything was dropped, for the
    /// caller to write back to the URL, and `None` when the state was
    /// already consistent.
    pub fn settle(&mut self) -> Option<FilterState> {
        if self.filter.colors.is_empty() {
            return None;
        }

        let kept = retain_available(&self.filter.colors, &self.available);
        if kept.len() == self.filter.colors.len() {
            return None;
        }

        debug!(
            selected = ?self.filter.colors,
            kept = ?kept,
            "Dropping unavailable colour filters"
        );
        self.filter.colors = kept;
        self.products.refilter(&self.filter.colors);
        Some(self.filter.clone())
    }

    #[must_use]
    pub const fn view(&self) -> &CatalogView {
        &self.view
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn products(&self) -> &ProductsState {
        &self.products
    }

    /// Colours offered by the loaded products, in palette order.
    #[must_use]
    pub fn available_colors(&self) -> &[Swatch] {
        &self.available
    }

    /// Available colours that are selected.
    #[must_use]
    pub fn selected_colors(&self) -> Vec<Swatch> {
        selected_colors(&self.available, &self.filter.colors)
    }

    #[must_use]
    pub fn color_filter_count(&self) -> usize {
        self.filter.colors.len()
    }

    /// 1 inside a collection, 0 on the root view.
    #[must_use]
    pub const fn category_filter_count(&self) -> usize {
        if self.view.is_root() { 0 } else { 1 }
    }

    /// Total active filters, shown on the filter button.
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.color_filter_count() + self.category_filter_count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use joyco_core::SortSpec;

    use super::*;
    use crate::catalog::{CatalogSource, CollectionProductsQuery};
    use crate::shopify::MockCatalog;

    async fn jackets() -> Vec<Product> {
        MockCatalog::bundled()
            .unwrap()
            .collection_products(&CollectionProductsQuery {
                handle: "jackets".to_string(),
                first: 100,
                sort: SortSpec::default(),
                search: None,
            })
            .await
            .unwrap()
    }

    fn session(query: &str) -> ShopSession {
        ShopSession::new(
            CatalogView::Collection("jackets".to_string()),
            FilterState::from_query(query).unwrap(),
        )
    }

    fn swatch_names(swatches: &[Swatch]) -> Vec<String> {
        swatches.iter().map(Swatch::name).collect()
    }

    #[tokio::test]
    async fn test_colors_come_from_unfiltered_products() {
        let mut session = session("fcolor=Olive");
        session.load(jackets().await);

        assert_eq!(session.products().filtered().len(), 1);
        assert_eq!(
            swatch_names(session.available_colors()),
            ["Olive", "Black", "Red", "Navy Blue"]
        );
        assert_eq!(swatch_names(&session.selected_colors()), ["Olive"]);
        assert!(session.settle().is_none());
    }

    #[tokio::test]
    async fn test_settle_prunes_and_refilters() {
        let mut session = session("sort=title&fcolor=Beige,Red");
        session.load(jackets().await);

        // Nothing in jackets is beige, but "Red" still matches the rain shell.
        assert_eq!(session.products().filtered().len(), 1);

        let healed = session.settle().unwrap();
        assert_eq!(healed.colors, ["Red"]);
        assert_eq!(healed.href("/shop/jackets"), "/shop/jackets?sort=title&fcolor=Red");
        assert_eq!(session.filter(), &healed);
        assert_eq!(session.products().filtered()[0].handle, "rain-shell");

        // Settling is idempotent.
        assert!(session.settle().is_none());
    }

    #[tokio::test]
    async fn test_empty_fetch_prunes_everything() {
        let mut session = session("fcolor=Olive");
        session.load(Vec::new());

        let healed = session.settle().unwrap();
        assert!(healed.colors.is_empty());
        assert_eq!(session.filter_count(), 1);
    }

    #[tokio::test]
    async fn test_grid_is_empty_until_unoffered_colour_is_dropped() {
        let bags = MockCatalog::bundled()
            .unwrap()
            .collection_products(&CollectionProductsQuery {
                handle: "bags".to_string(),
                first: 100,
                sort: SortSpec::default(),
                search: None,
            })
            .await
            .unwrap();
        let mut session = ShopSession::new(
            CatalogView::Collection("bags".to_string()),
            FilterState::from_query("fcolor=Olive").unwrap(),
        );
        session.load(bags);

        assert_eq!(session.products().original().len(), 2);
        assert!(session.products().filtered().is_empty());

        let healed = session.settle().unwrap();
        assert!(healed.colors.is_empty());
        assert_eq!(session.products().filtered().len(), 2);
    }

    #[test]
    fn test_filter_counts() {
        let root = ShopSession::new(
            CatalogView::Root,
            FilterState::from_query("fcolor=Red,Blue").unwrap(),
        );
        assert_eq!(root.category_filter_count(), 0);
        assert_eq!(root.color_filter_count(), 2);
        assert_eq!(root.filter_count(), 2);

        let collection = session("fcolor=Red");
        assert_eq!(collection.category_filter_count(), 1);
        assert_eq!(collection.filter_count(), 2);
    }
}
