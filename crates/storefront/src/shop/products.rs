//! Products shown by one shop view.

use crate::shop::filter::filter_by_colors;
use crate::shopify::types::Product;

/// The unfiltered fetch result and the colour-filtered list derived from it.
///
/// Both lists are always replaced together, `original` first, so readers
/// never see a filtered list that belongs to a different fetch.
#[derive(Debug, Clone, Default)]
pub struct ProductsState {
    original: Vec<Product>,
    filtered: Vec<Product>,
}

impl ProductsState {
    /// Store a fresh fetch and filter it by `colors`.
    pub fn replace(&mut self, products: Vec<Product>, colors: &[String]) {
        self.original = products;
        self.refilter(colors);
    }

    /// Recompute the filtered list from the stored fetch.
    pub fn refilter(&mut self, colors: &[String]) {
        self.filtered = filter_by_colors(&self.original, colors);
    }

    /// Everything the backend returned.
    #[must_use]
    pub fn original(&self) -> &[Product] {
        &self.original
    }

    /// What the grid shows.
    #[must_use]
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }
}
