//! Upstream payload shapes.
//!
//! Both the live Storefront API responses and the mock fixture use these
//! shapes. Every field is optional or defaulted so a partial node still
//! deserializes; the adapter decides what the gaps mean.

use serde::{Deserialize, Serialize};

/// `{ edges: [{ node }] }` connection wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default)]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    /// Unwrap the edges into their nodes.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoney {
    pub amount: Option<String>,
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceRange {
    pub min_variant_price: Option<RawMoney>,
    pub max_variant_price: Option<RawMoney>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    #[serde(default)]
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Base64-encoded thumbhash bytes.
    pub thumbhash: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSeo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCategory {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// An option value is a bare string in the Storefront API and a record in
/// some fixtures. Either record field may be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOptionValue {
    Name(String),
    Record {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: String,
    },
}

impl RawOptionValue {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Record { name, .. } => name,
        }
    }

    /// Upstream id, only records carry one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Record { id, .. } => id.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOption {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: Vec<RawOptionValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSelectedOption {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Variant node, read out of the raw variants container by the adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    #[serde(default)]
    pub id: String,
    pub title: Option<String>,
    pub available_for_sale: Option<bool>,
    pub price: Option<RawMoney>,
    pub selected_options: Option<Vec<RawSelectedOption>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub description_html: Option<String>,
    pub seo: Option<RawSeo>,
    pub price_range: Option<RawPriceRange>,
    pub compare_at_price_range: Option<RawPriceRange>,
    pub available_for_sale: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub product_type: Option<String>,
    pub category: Option<RawCategory>,
    pub options: Option<Vec<RawOption>>,
    /// Kept untyped; a malformed container yields no variants rather than
    /// failing the whole product.
    #[serde(default)]
    pub variants: serde_json::Value,
    pub images: Option<Connection<RawImage>>,
    /// Fixture-only marker for membership in the `featured` collection.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCollection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub seo: Option<RawSeo>,
    pub image: Option<RawImage>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_option_values_accept_strings_and_records() {
        let option: RawOption = serde_json::from_str(
            r#"{"name": "Color", "values": ["Red", {"id": "blue", "name": "Blue"}]}"#,
        )
        .unwrap();
        let names: Vec<&str> = option.values.iter().map(RawOptionValue::name).collect();
        assert_eq!(names, ["Red", "Blue"]);
    }

    #[test]
    fn test_option_value_record_without_name() {
        let product: RawProduct = serde_json::from_str(
            r#"{"options": [{"name": "Color", "values": [{"id": "red"}]}]}"#,
        )
        .unwrap();
        let options = product.options.unwrap();
        let value = &options[0].values[0];
        assert_eq!(value.id(), Some("red"));
        assert_eq!(value.name(), "");
    }

    #[test]
    fn test_sparse_product_deserializes() {
        let product: RawProduct = serde_json::from_str(r#"{"handle": "tee"}"#).unwrap();
        assert_eq!(product.handle, "tee");
        assert!(product.variants.is_null());
        assert!(!product.featured);
    }
}
