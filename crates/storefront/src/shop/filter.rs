//! In-memory colour filtering of a product list.

use crate::shopify::types::Product;

/// Keep the products that offer any of `colors`.
///
/// A product matches when a variant's colour option fuzzily matches a
/// selected colour. Products whose variants never match fall back to the
/// values of their first colour-like option. With no colours selected the
/// list is returned as is.
#[must_use]
pub fn filter_by_colors(products: &[Product], colors: &[String]) -> Vec<Product> {
    if colors.is_empty() {
        return products.to_vec();
    }

    let selected: Vec<String> = colors.iter().map(|c| c.to_lowercase()).collect();

    products
        .iter()
        .filter(|p| product_matches(p, &selected))
        .cloned()
        .collect()
}

fn product_matches(product: &Product, selected: &[String]) -> bool {
    let variant_match = product.variants.iter().any(|variant| {
        variant
            .selected_options
            .iter()
            .filter(|o| is_color_like(&o.name))
            .any(|o| matches_any(&o.value, selected))
    });
    if variant_match {
        return true;
    }

    product
        .options
        .iter()
        .find(|o| is_color_like(&o.name))
        .is_some_and(|option| {
            option.values.iter().any(|v| {
                let value = if v.name.is_empty() { &v.id } else { &v.name };
                matches_any(value, selected)
            })
        })
}

/// `color` or `colour` anywhere in the option name.
fn is_color_like(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("color") || name.contains("colour")
}

/// Equal, or either side contains the other. `selected` is lower-cased.
///
/// An empty candidate is contained in every selection and so always matches.
fn matches_any(candidate: &str, selected: &[String]) -> bool {
    let candidate = candidate.to_lowercase();
    selected
        .iter()
        .any(|s| candidate == *s || candidate.contains(s.as_str()) || s.contains(&candidate))
}

#[cfg(test)]
mod tests {
    use joyco_core::Money;

    use super::*;
    use crate::shopify::types::{
        Image, OptionValue, PriceRange, ProductOption, ProductVariant, SelectedOption, Seo,
    };

    fn product(handle: &str) -> Product {
        Product {
            id: format!("gid://shopify/Product/{handle}"),
            handle: handle.to_string(),
            title: handle.to_string(),
            description: String::new(),
            description_html: String::new(),
            seo: Seo {
                title: handle.to_string(),
                description: String::new(),
            },
            price_range: PriceRange {
                min_variant_price: Money::default(),
                max_variant_price: Money::default(),
            },
            compare_at_price: None,
            currency_code: "USD".to_string(),
            available_for_sale: true,
            tags: Vec::new(),
            category_id: None,
            options: Vec::new(),
            variants: Vec::new(),
            images: Vec::new(),
            featured_image: Image::placeholder(),
        }
    }

    fn with_variant_colors(mut p: Product, option: &str, values: &[&str]) -> Product {
        p.variants = values
            .iter()
            .map(|v| ProductVariant {
                id: format!("{}-{v}", p.handle),
                title: (*v).to_string(),
                available_for_sale: true,
                price: Money::default(),
                selected_options: vec![SelectedOption {
                    name: option.to_string(),
                    value: (*v).to_string(),
                }],
            })
            .collect();
        p
    }

    fn with_option(mut p: Product, name: &str, values: &[(&str, &str)]) -> Product {
        p.options.push(ProductOption {
            id: name.to_lowercase(),
            name: name.to_string(),
            values: values
                .iter()
                .map(|(id, name)| OptionValue {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                })
                .collect(),
        });
        p
    }

    fn handles(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.handle.as_str()).collect()
    }

    fn colors(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_no_selection_is_identity() {
        let products = vec![product("a"), product("b")];
        assert_eq!(filter_by_colors(&products, &[]), products);
    }

    #[test]
    fn test_variant_color_fuzzy_match() {
        let products = vec![
            with_variant_colors(product("navy"), "Color", &["Navy Blue"]),
            with_variant_colors(product("red"), "Colour", &["Red"]),
            with_variant_colors(product("dark-red"), "Base color", &["Dark Red"]),
            with_variant_colors(product("size"), "Size", &["Red"]),
        ];

        // "blue" is contained in "navy blue"; "red" in "dark red".
        assert_eq!(
            handles(&filter_by_colors(&products, &colors(&["blue"]))),
            ["navy"]
        );
        assert_eq!(
            handles(&filter_by_colors(&products, &colors(&["RED"]))),
            ["red", "dark-red"]
        );
    }

    #[test]
    fn test_selected_contains_candidate() {
        let products = vec![with_variant_colors(product("navy"), "Color", &["Navy"])];
        assert_eq!(
            handles(&filter_by_colors(&products, &colors(&["Navy Blue"]))),
            ["navy"]
        );
    }

    #[test]
    fn test_option_fallback_uses_first_color_option() {
        let options_only = with_option(product("tote"), "Color", &[("beige", "Beige")]);
        let id_only = with_option(product("mug"), "Colour", &[("white", "")]);
        let second_option = with_option(
            with_option(product("scarf"), "Color", &[("gray", "Gray")]),
            "Trim colour",
            &[("red", "Red")],
        );

        let products = vec![options_only, id_only, second_option];
        assert_eq!(
            handles(&filter_by_colors(&products, &colors(&["beige", "white"]))),
            ["tote", "mug"]
        );
        // Only the first colour-like option is consulted.
        assert!(filter_by_colors(&products[2..], &colors(&["red"])).is_empty());
    }

    #[test]
    fn test_blank_colour_value_matches_any_selection() {
        let products = vec![with_variant_colors(product("blank"), "Color", &[""])];
        assert_eq!(
            handles(&filter_by_colors(&products, &colors(&["Olive"]))),
            ["blank"]
        );
    }

    #[test]
    fn test_variant_miss_falls_back_to_options() {
        let p = with_option(
            with_variant_colors(product("shirt"), "Colour", &["White"]),
            "Color",
            &[("white", "White"), ("blue", "Blue")],
        );
        let products = vec![p];
        assert_eq!(
            handles(&filter_by_colors(&products, &colors(&["Blue"]))),
            ["shirt"]
        );
        assert!(filter_by_colors(&products, &colors(&["Green"])).is_empty());
    }
}
