//! Product conversion.

use joyco_core::Money;
use rust_decimal::Decimal;

use super::images::adapt_image;
use super::text::{first_sentence, slugify_option};
use crate::shopify::raw::{
    Connection, RawMoney, RawOption, RawPriceRange, RawProduct, RawVariant,
};
use crate::shopify::types::{
    Image, OptionValue, PriceRange, Product, ProductOption, ProductVariant, SelectedOption, Seo,
};

/// Convert an upstream product into the catalog shape.
#[must_use]
pub fn adapt_product(raw: RawProduct) -> Product {
    let description = first_sentence(raw.description.as_deref().unwrap_or_default());

    let min_price = min_variant_price(raw.price_range.as_ref());
    let compare_at_price = compare_at_price(raw.compare_at_price_range.as_ref(), min_price);
    let min_variant_price = money(min_price);

    let images: Vec<Image> = raw
        .images
        .map(Connection::into_nodes)
        .unwrap_or_default()
        .into_iter()
        .map(|image| adapt_image(image, &raw.title))
        .collect();
    let featured_image = images.first().cloned().unwrap_or_else(Image::placeholder);

    let seo = raw.seo.unwrap_or_default();
    let seo = Seo {
        title: non_empty(seo.title).unwrap_or_else(|| raw.title.clone()),
        description: non_empty(seo.description).unwrap_or_else(|| description.clone()),
    };

    let category_id = non_empty(raw.product_type)
        .or_else(|| raw.category.and_then(|category| non_empty(category.name)));

    Product {
        id: raw.id,
        handle: raw.handle,
        description_html: raw.description_html.unwrap_or_default(),
        description,
        seo,
        currency_code: min_variant_price.currency_code.clone(),
        // The storefront only reads the minimum price; the maximum mirrors it.
        price_range: PriceRange {
            max_variant_price: min_variant_price.clone(),
            min_variant_price,
        },
        compare_at_price,
        available_for_sale: raw.available_for_sale.unwrap_or(true),
        tags: raw.tags.unwrap_or_default(),
        category_id,
        options: raw
            .options
            .unwrap_or_default()
            .into_iter()
            .map(adapt_option)
            .collect(),
        variants: adapt_variants(&raw.variants),
        images,
        featured_image,
        title: raw.title,
    }
}

fn min_variant_price(range: Option<&RawPriceRange>) -> Option<&RawMoney> {
    range.and_then(|r| r.min_variant_price.as_ref())
}

fn money(raw: Option<&RawMoney>) -> Money {
    Money::from_parts(
        raw.and_then(|m| m.amount.as_deref()),
        raw.and_then(|m| m.currency_code.as_deref()),
    )
}

/// Compare-at price, kept only when strictly above the minimum price.
///
/// A missing minimum counts as zero; an unparsable amount on either side
/// drops the compare-at price.
fn compare_at_price(range: Option<&RawPriceRange>, min_price: Option<&RawMoney>) -> Option<Money> {
    let compare_at = min_variant_price(range)?;
    let compare_amount: Decimal = compare_at.amount.as_deref()?.trim().parse().ok()?;
    let min_amount: Decimal = match min_price.and_then(|m| m.amount.as_deref()) {
        Some(amount) if !amount.trim().is_empty() => amount.trim().parse().ok()?,
        _ => Decimal::ZERO,
    };

    (compare_amount > min_amount).then(|| money(Some(compare_at)))
}

fn adapt_option(option: RawOption) -> ProductOption {
    let id = non_empty(option.id).unwrap_or_else(|| slugify_option(&option.name));
    let values = option
        .values
        .iter()
        .map(|value| OptionValue {
            id: value
                .id()
                .filter(|id| !id.trim().is_empty())
                .map_or_else(|| slugify_option(value.name()), str::to_string),
            name: value.name().to_string(),
        })
        .collect();

    ProductOption {
        id,
        name: option.name,
        values,
    }
}

/// Read variants out of the raw `{ edges: [{ node }] }` container.
///
/// Anything that is not that shape yields no variants; a single malformed
/// node is skipped.
fn adapt_variants(container: &serde_json::Value) -> Vec<ProductVariant> {
    let Some(edges) = container.get("edges").and_then(serde_json::Value::as_array) else {
        return Vec::new();
    };

    edges
        .iter()
        .filter_map(|edge| edge.get("node"))
        .filter_map(|node| serde_json::from_value::<RawVariant>(node.clone()).ok())
        .map(|variant| ProductVariant {
            price: money(variant.price.as_ref()),
            id: variant.id,
            title: variant.title.unwrap_or_default(),
            available_for_sale: variant.available_for_sale.unwrap_or(true),
            selected_options: variant
                .selected_options
                .unwrap_or_default()
                .into_iter()
                .map(|o| SelectedOption {
                    name: o.name,
                    value: o.value,
                })
                .collect(),
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
