//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use joyco_core::{ROOT_CATEGORY_ID, is_valid_handle};
use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use super::{BreadcrumbItem, SHOP_PATH};
use crate::error::{AppError, Result};
use crate::shopify::types::{Collection, Image, Product};
use crate::state::AppState;

/// Tag that keeps a product out of search engines.
pub const HIDDEN_PRODUCT_TAG: &str = "nextjs-frontend-hidden";

/// Image display data.
#[derive(Debug, Clone, Serialize)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
    /// Blurred preview data URL, shown until `url` loads.
    pub placeholder: Option<String>,
}

impl ImageView {
    /// `None` for the empty placeholder image.
    fn from_image(image: &Image) -> Option<Self> {
        (!image.is_placeholder()).then(|| Self {
            url: image.url.clone(),
            alt: image.alt_text.clone(),
            width: image.width,
            height: image.height,
            placeholder: image.thumbhash.clone(),
        })
    }
}

/// A product tile in the shop grid.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub handle: String,
    pub title: String,
    pub href: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub available_for_sale: bool,
    pub featured_image: Option<ImageView>,
    /// Whether the tile can add to cart itself instead of linking to the
    /// product page.
    pub in_card_add_to_cart: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            href: product_path(&product.handle),
            price: product.price_range.min_variant_price.format(),
            compare_at_price: product.compare_at_price.as_ref().map(joyco_core::Money::format),
            available_for_sale: product.available_for_sale,
            featured_image: ImageView::from_image(&product.featured_image),
            in_card_add_to_cart: in_card_add_to_cart(product),
        }
    }
}

/// No options, a single one-value option, or only a colour option.
fn in_card_add_to_cart(product: &Product) -> bool {
    match product.options.as_slice() {
        [] => true,
        [only] => only.values.len() == 1 || only.name.eq_ignore_ascii_case("color"),
        _ => false,
    }
}

/// Path of a product page.
#[must_use]
pub fn product_path(handle: &str) -> String {
    format!("/product/{handle}")
}

/// Open Graph image for social previews.
#[derive(Debug, Clone, Serialize)]
pub struct OpenGraphImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Page metadata for a product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductMeta {
    pub title: String,
    pub description: String,
    /// `false` sets `noindex, nofollow`.
    pub indexable: bool,
    pub open_graph_image: Option<OpenGraphImage>,
}

/// Product detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub product: Product,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub breadcrumb: Vec<BreadcrumbItem>,
    pub show_variant_selector: bool,
    /// Add-to-cart spans the full row when there is no selector beside it or
    /// the selectors fill whole rows.
    pub full_width_add_to_cart: bool,
    pub meta: ProductMeta,
    /// schema.org `Product` for the `application/ld+json` script.
    pub json_ld: serde_json::Value,
}

impl ProductPage {
    #[must_use]
    pub fn new(product: Product, collection: Option<&Collection>) -> Self {
        let has_variants = product.variants.len() > 1;
        let even_options = product.options.len() % 2 == 0;

        Self {
            price: product.price_range.min_variant_price.format(),
            compare_at_price: product.compare_at_price.as_ref().map(joyco_core::Money::format),
            breadcrumb: product_breadcrumb(&product, collection),
            show_variant_selector: has_variants,
            full_width_add_to_cart: !has_variants || even_options,
            meta: product_meta(&product),
            json_ld: product_json_ld(&product),
            product,
        }
    }
}

fn product_meta(product: &Product) -> ProductMeta {
    let image = &product.featured_image;
    let open_graph_image = (!image.url.is_empty()).then(|| OpenGraphImage {
        url: image.url.clone(),
        width: image.width,
        height: image.height,
        alt: image.alt_text.clone(),
    });

    ProductMeta {
        title: non_empty_or(&product.seo.title, &product.title),
        description: non_empty_or(&product.seo.description, &product.description),
        indexable: !product.tags.iter().any(|t| t == HIDDEN_PRODUCT_TAG),
        open_graph_image,
    }
}

fn product_json_ld(product: &Product) -> serde_json::Value {
    let availability = if product.available_for_sale {
        "https://schema.org/InStock"
    } else {
        "https://schema.org/OutOfStock"
    };

    json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": product.title,
        "description": product.description,
        "image": product.featured_image.url,
        "offers": {
            "@type": "AggregateOffer",
            "availability": availability,
            "priceCurrency": product.currency_code,
            "highPrice": product.price_range.max_variant_price.amount,
            "lowPrice": product.price_range.min_variant_price.amount,
        },
    })
}

/// Shop, then the product's category when it resolves, then the product.
fn product_breadcrumb(product: &Product, collection: Option<&Collection>) -> Vec<BreadcrumbItem> {
    let mut crumbs = vec![BreadcrumbItem::link("Shop", SHOP_PATH)];

    if let Some(collection) = collection {
        let category = collection
            .parent_category_tree
            .iter()
            .find(|c| c.id != ROOT_CATEGORY_ID);
        crumbs.push(match category {
            Some(parent) => BreadcrumbItem::link(&parent.name, &format!("{SHOP_PATH}/{}", parent.id)),
            None => BreadcrumbItem::link(&collection.title, &collection.path),
        });
    }

    crumbs.push(BreadcrumbItem::current(&product.title));
    crumbs
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Display a product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ProductPage>> {
    if !is_valid_handle(&handle) {
        return Err(AppError::BadRequest(format!("invalid product handle: {handle}")));
    }

    let catalog = state.catalog();
    let product = catalog
        .get_product(&handle)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {handle}")))?;

    let collection = match product.category_id.as_deref() {
        Some(category) => catalog.get_collection(&category.to_lowercase()).await,
        None => None,
    };

    Ok(Json(ProductPage::new(product, collection.as_ref())))
}
