//! Collection conversion.

use chrono::Utc;

use super::images::adapt_image;
use crate::shopify::raw::RawCollection;
use crate::shopify::types::{Collection, Seo};

/// Convert an upstream collection into the catalog shape.
///
/// Shopify collections carry no hierarchy, so the ancestor tree is always
/// empty, and `updated_at` is the conversion time.
#[must_use]
pub fn adapt_collection(raw: RawCollection) -> Collection {
    let description = raw.description.unwrap_or_default();
    let seo = raw.seo.unwrap_or_default();
    let seo = Seo {
        title: seo
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| raw.title.clone()),
        description: seo
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| description.clone()),
    };

    Collection {
        path: format!("/shop/{}", raw.handle),
        image: raw.image.map(|image| adapt_image(image, &raw.title)),
        id: raw.id,
        handle: raw.handle,
        title: raw.title,
        description,
        seo,
        parent_category_tree: Vec::new(),
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopify::raw::RawSeo;

    #[test]
    fn test_adapt_collection() {
        let before = Utc::now();
        let collection = adapt_collection(RawCollection {
            id: "gid://shopify/Collection/1".to_string(),
            handle: "jackets".to_string(),
            title: "Jackets".to_string(),
            description: None,
            seo: None,
            image: None,
        });

        assert_eq!(collection.path, "/shop/jackets");
        assert_eq!(collection.seo.title, "Jackets");
        assert_eq!(collection.seo.description, "");
        assert!(collection.parent_category_tree.is_empty());
        assert!(collection.updated_at >= before);
    }

    #[test]
    fn test_collection_seo_override() {
        let collection = adapt_collection(RawCollection {
            handle: "bags".to_string(),
            title: "Bags".to_string(),
            description: Some("Carry everything.".to_string()),
            seo: Some(RawSeo {
                title: Some("Bags & Totes".to_string()),
                description: Some(String::new()),
            }),
            ..Default::default()
        });

        assert_eq!(collection.seo.title, "Bags & Totes");
        assert_eq!(collection.seo.description, "Carry everything.");
    }
}
