//! Colour filter options derived from the loaded products.
//!
//! The available set is recomputed from the unfiltered product list every
//! time that list changes. It is never stored in the URL.

use std::collections::HashSet;

use joyco_core::{PALETTE, Swatch, find_in_palette};

use crate::shopify::types::Product;

/// Option name that feeds the colour filter.
const COLOR_OPTION: &str = "color";

/// Palette colours offered by at least one product, in palette order.
///
/// Only an option named exactly `color` (ignoring case) counts, and only
/// values whose name is a palette colour.
#[must_use]
pub fn available_colors(products: &[Product]) -> Vec<Swatch> {
    let offered: HashSet<&'static str> = products
        .iter()
        .filter_map(|p| {
            p.options
                .iter()
                .find(|o| o.name.eq_ignore_ascii_case(COLOR_OPTION))
        })
        .flat_map(|o| &o.values)
        .filter_map(|v| find_in_palette(&v.name))
        .map(|c| c.name)
        .collect();

    PALETTE
        .iter()
        .filter(|c| offered.contains(c.name))
        .map(|c| Swatch::from(*c))
        .collect()
}

/// Available swatches whose names are in `selected`, in palette order.
#[must_use]
pub fn selected_colors(available: &[Swatch], selected: &[String]) -> Vec<Swatch> {
    available
        .iter()
        .filter(|s| contains(selected, &s.name()))
        .copied()
        .collect()
}

/// The selected names that are still available, in selection order.
#[must_use]
pub fn retain_available(selected: &[String], available: &[Swatch]) -> Vec<String> {
    let names: Vec<String> = available.iter().map(Swatch::name).collect();
    selected
        .iter()
        .filter(|c| contains(&names, c))
        .cloned()
        .collect()
}

fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogSource, ProductQuery};
    use crate::shopify::MockCatalog;

    async fn products() -> Vec<Product> {
        MockCatalog::bundled()
            .unwrap()
            .products(&ProductQuery {
                first: 100,
                sort: joyco_core::SortSpec::default(),
                search: None,
            })
            .await
            .unwrap()
    }

    fn names(swatches: &[Swatch]) -> Vec<String> {
        swatches.iter().map(Swatch::name).collect()
    }

    #[tokio::test]
    async fn test_available_colors_in_palette_order() {
        let available = available_colors(&products().await);

        // "Dark Red" is not in the palette; "sand" matches "Sand".
        assert_eq!(
            names(&available),
            ["Olive", "Beige", "White", "Blue", "Brown", "Sand", "Black", "Red", "Gray", "Navy Blue"]
        );
    }

    #[test]
    fn test_no_products_no_colors() {
        assert!(available_colors(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_selected_and_retained() {
        let available = available_colors(&products().await);
        let selected = vec!["red".to_string(), "Purple".to_string(), "Olive".to_string()];

        assert_eq!(names(&selected_colors(&available, &selected)), ["Olive", "Red"]);
        assert_eq!(retain_available(&selected, &available), ["red", "Olive"]);
    }
}
