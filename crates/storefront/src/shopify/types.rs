//! Catalog domain types.
//!
//! These are the shapes the rest of the storefront consumes. Upstream
//! payloads (live or fixture) are converted into them by the adapter in
//! [`crate::shopify::adapter`] and never leak past it.

use chrono::{DateTime, Utc};
use joyco_core::Money;
use serde::{Deserialize, Serialize};

// =============================================================================
// Price Types
// =============================================================================

/// Price range for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
    /// Maximum price among all variants.
    pub max_variant_price: Money,
}

// =============================================================================
// Image Types
// =============================================================================

/// Product or collection image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL. Empty for the placeholder image.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Blurred preview as a `data:image/png;base64,...` URL.
    pub thumbhash: Option<String>,
}

impl Image {
    /// Stand-in used when a product has no images.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            url: String::new(),
            alt_text: String::new(),
            width: 0,
            height: 0,
            thumbhash: None,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.url.is_empty()
    }
}

// =============================================================================
// SEO Types
// =============================================================================

/// SEO metadata, resolved against the entity's own title and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    /// Page title for search engines.
    pub title: String,
    /// Meta description.
    pub description: String,
}

// =============================================================================
// Product Types
// =============================================================================

/// Selected option on a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size", "Color").
    pub name: String,
    /// Selected value (e.g., "Large", "Blue").
    pub value: String,
}

/// One value of a product option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    /// Slug of the value name.
    pub id: String,
    pub name: String,
}

/// Product option definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Upstream id, or a slug of the option name.
    pub id: String,
    /// Option name (e.g., "Size").
    pub name: String,
    /// Available values.
    pub values: Vec<OptionValue>,
}

/// Product variant (specific combination of options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: Money,
    pub selected_options: Vec<SelectedOption>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Shopify product ID.
    pub id: String,
    /// URL handle (slug).
    pub handle: String,
    /// Product title.
    pub title: String,
    /// First sentence of the plain-text description.
    pub description: String,
    /// Full HTML description.
    pub description_html: String,
    /// SEO metadata.
    pub seo: Seo,
    /// Price range.
    pub price_range: PriceRange,
    /// Compare-at price, only when above the minimum price.
    pub compare_at_price: Option<Money>,
    /// Currency of the minimum price.
    pub currency_code: String,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Product tags.
    pub tags: Vec<String>,
    /// Product type, or the taxonomy category name.
    pub category_id: Option<String>,
    /// Product options (e.g., Size, Color).
    pub options: Vec<ProductOption>,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
    /// Product images.
    pub images: Vec<Image>,
    /// First image, or a placeholder.
    pub featured_image: Image,
}

impl Product {
    /// Check whether the product carries a tag (exact match).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

// =============================================================================
// Collection Types
// =============================================================================

/// Reference to an ancestor category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

/// Product collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Shopify collection ID.
    pub id: String,
    /// URL handle (slug).
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// SEO metadata.
    pub seo: Seo,
    /// Shop path (`/shop/{handle}`).
    pub path: String,
    /// Ancestor categories, root first. Always empty for Shopify collections.
    pub parent_category_tree: Vec<CategoryRef>,
    /// When the collection was fetched.
    pub updated_at: DateTime<Utc>,
    /// Collection image.
    pub image: Option<Image>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_image() {
        let image = Image::placeholder();
        assert!(image.is_placeholder());
        assert_eq!((image.width, image.height), (0, 0));
    }
}
