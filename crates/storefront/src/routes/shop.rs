//! Shop route handlers.
//!
//! Both handlers parse the filter state from the raw query string, fetch the
//! view's products and collections, and settle the colour selection. When
//! settling drops colours the shopper is redirected to the healed URL so the
//! address bar never shows a filter that is not applied.

use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use joyco_core::{CatalogView, SORT_OPTIONS, SortOption, Swatch, is_valid_handle};
use serde::Serialize;
use tracing::{debug, instrument};

use super::products::ProductCard;
use super::{BreadcrumbItem, PageMeta, SHOP_PATH, SITE_NAME};
use crate::catalog::{Catalog, CatalogSource};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::shop::{FilterState, ShopSession};
use crate::shopify::types::Collection;
use crate::state::AppState;

const SHOP_DESCRIPTION: &str = "ACME Store, your one-stop shop for all your needs.";

/// Summary of the collection a view shows.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionSummary {
    pub handle: String,
    pub title: String,
    pub description: String,
    pub path: String,
}

/// An entry in the category list.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryLink {
    pub handle: String,
    pub title: String,
    pub path: String,
    pub selected: bool,
}

/// An entry in the sort dropdown.
#[derive(Debug, Clone, Serialize)]
pub struct SortLink {
    #[serde(flatten)]
    pub option: SortOption,
    pub selected: bool,
    pub href: String,
}

/// A colour the shopper can toggle.
#[derive(Debug, Clone, Serialize)]
pub struct ColorOption {
    pub name: String,
    pub swatch: Swatch,
    pub selected: bool,
    /// URL with this colour toggled.
    pub href: String,
}

/// Shop listing page.
#[derive(Debug, Clone, Serialize)]
pub struct ShopPage {
    pub view: CatalogView,
    pub collection: Option<CollectionSummary>,
    pub breadcrumb: Vec<BreadcrumbItem>,
    pub filter: FilterState,
    /// Current URL without the sort.
    pub clear_sort_href: String,
    pub sort_options: Vec<SortLink>,
    pub categories: Vec<CategoryLink>,
    pub available_colors: Vec<ColorOption>,
    pub selected_colors: Vec<Swatch>,
    pub filter_count: usize,
    pub color_filter_count: usize,
    pub category_filter_count: usize,
    pub results_count: usize,
    pub products: Vec<ProductCard>,
    pub meta: PageMeta,
}

impl ShopPage {
    #[must_use]
    pub fn new(session: &ShopSession, collections: &[Collection]) -> Self {
        let view = session.view();
        let filter = session.filter();
        let path = view_path(view);
        let collection = view
            .handle()
            .and_then(|handle| collections.iter().find(|c| c.handle == handle));

        let mut unsorted = filter.clone();
        unsorted.clear_sort();

        let current_sort = filter.sort.as_deref().and_then(SortOption::lookup);
        let sort_options = SORT_OPTIONS
            .iter()
            .map(|option| {
                let mut sorted = filter.clone();
                sorted.sort = Some(option.value.to_string());
                SortLink {
                    option: *option,
                    selected: current_sort == Some(option),
                    href: sorted.href(&path),
                }
            })
            .collect();

        let categories = collections
            .iter()
            .map(|c| CategoryLink {
                handle: c.handle.clone(),
                title: c.title.clone(),
                path: c.path.clone(),
                selected: view.handle() == Some(c.handle.as_str()),
            })
            .collect();

        let available_colors = session
            .available_colors()
            .iter()
            .map(|swatch| {
                let name = swatch.name();
                ColorOption {
                    selected: filter.is_selected(&name),
                    href: filter.with_color_toggled(swatch).href(&path),
                    name,
                    swatch: *swatch,
                }
            })
            .collect();

        let filtered = session.products().filtered();

        Self {
            view: view.clone(),
            collection: collection.map(|c| CollectionSummary {
                handle: c.handle.clone(),
                title: c.title.clone(),
                description: c.description.clone(),
                path: c.path.clone(),
            }),
            breadcrumb: shop_breadcrumb(view, collection),
            filter: filter.clone(),
            clear_sort_href: unsorted.href(&path),
            sort_options,
            categories,
            available_colors,
            selected_colors: session.selected_colors(),
            filter_count: session.filter_count(),
            color_filter_count: session.color_filter_count(),
            category_filter_count: session.category_filter_count(),
            results_count: filtered.len(),
            products: filtered.iter().map(ProductCard::from).collect(),
            meta: shop_meta(collection),
        }
    }
}

/// URL path of a view.
fn view_path(view: &CatalogView) -> String {
    match view.handle() {
        Some(handle) => format!("{SHOP_PATH}/{handle}"),
        None => SHOP_PATH.to_string(),
    }
}

/// "Shop", then "All" on the root view or the collection title.
fn shop_breadcrumb(view: &CatalogView, collection: Option<&Collection>) -> Vec<BreadcrumbItem> {
    let mut crumbs = vec![BreadcrumbItem::link("Shop", SHOP_PATH)];
    if view.is_root() {
        crumbs.push(BreadcrumbItem::current("All"));
    } else if let Some(collection) = collection {
        crumbs.push(BreadcrumbItem::current(&collection.title));
    }
    crumbs
}

fn shop_meta(collection: Option<&Collection>) -> PageMeta {
    let Some(collection) = collection else {
        return PageMeta {
            title: format!("{SITE_NAME} | Shop"),
            description: SHOP_DESCRIPTION.to_string(),
        };
    };

    let title = if collection.seo.title.is_empty() {
        &collection.title
    } else {
        &collection.seo.title
    };
    let description = [&collection.seo.description, &collection.description]
        .into_iter()
        .find(|d| !d.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| format!("{} products", collection.title));

    PageMeta {
        title: format!("{SITE_NAME} | {title}"),
        description,
    }
}

/// Display the whole catalog.
#[instrument(skip(state, query))]
pub async fn index(State(state): State<AppState>, RawQuery(query): RawQuery) -> Result<Response> {
    render(&state, CatalogView::Root, query.as_deref()).await
}

/// Display one collection. The root sentinel shows the whole catalog.
#[instrument(skip(state, query))]
pub async fn show(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    if !is_valid_handle(&collection) {
        return Err(AppError::BadRequest(format!(
            "invalid collection handle: {collection}"
        )));
    }
    render(&state, CatalogView::from_segment(Some(&collection)), query.as_deref()).await
}

/// Fetch a view's products and the collection list into a loaded session.
///
/// The session is not settled; the caller decides how to surface healing.
pub async fn load_session<S: CatalogSource>(
    catalog: &Catalog<S>,
    view: CatalogView,
    filter: FilterState,
) -> (ShopSession, Vec<Collection>) {
    let search = filter.query.as_deref();
    let (products, collections) = match view.handle() {
        None => tokio::join!(
            catalog.list_products(filter.product_sort(), search),
            catalog.list_collections()
        ),
        Some(handle) => tokio::join!(
            catalog.list_collection_products(handle, filter.collection_sort(), search),
            catalog.list_collections()
        ),
    };

    let mut session = ShopSession::new(view, filter);
    session.load(products);
    (session, collections)
}

/// Path of the healed URL when settling drops colours.
#[must_use]
pub fn settle_location(session: &mut ShopSession) -> Option<String> {
    session
        .settle()
        .map(|healed| healed.href(&view_path(session.view())))
}

async fn render(state: &AppState, view: CatalogView, query: Option<&str>) -> Result<Response> {
    let filter = FilterState::from_query(query.unwrap_or_default())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (mut session, collections) = load_session(state.catalog(), view, filter).await;

    if let Some(location) = settle_location(&mut session) {
        add_breadcrumb("shop", "Dropped unavailable colour filters", &[("location", location.as_str())]);
        debug!(location = %location, "Redirecting to healed filter state");

        let location = HeaderValue::from_str(&location)
            .map_err(|e| AppError::Internal(format!("healed URL is not a header value: {e}")))?;
        return Ok((StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response());
    }

    Ok(Json(ShopPage::new(&session, &collections)).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::shopify::types::Seo;

    fn collection(handle: &str, title: &str, seo: Seo, description: &str) -> Collection {
        Collection {
            id: format!("gid://shopify/Collection/{handle}"),
            handle: handle.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            seo,
            path: format!("/shop/{handle}"),
            parent_category_tree: Vec::new(),
            updated_at: chrono::Utc::now(),
            image: None,
        }
    }

    fn seo(title: &str, description: &str) -> Seo {
        Seo {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_root_meta() {
        let meta = shop_meta(None);
        assert_eq!(meta.title, "ACME Store | Shop");
        assert_eq!(meta.description, SHOP_DESCRIPTION);
    }

    #[test]
    fn test_collection_meta_fallbacks() {
        let with_seo = collection("jackets", "Jackets", seo("Outerwear", "Stay dry."), "Coats.");
        let meta = shop_meta(Some(&with_seo));
        assert_eq!(meta.title, "ACME Store | Outerwear");
        assert_eq!(meta.description, "Stay dry.");

        let plain = collection("bags", "Bags", seo("", ""), "Totes.");
        let meta = shop_meta(Some(&plain));
        assert_eq!(meta.title, "ACME Store | Bags");
        assert_eq!(meta.description, "Totes.");

        let bare = collection("misc", "Misc", seo("", ""), "");
        assert_eq!(shop_meta(Some(&bare)).description, "Misc products");
    }

    #[test]
    fn test_breadcrumbs() {
        let bags = collection("bags", "Bags", seo("", ""), "");
        let labels = |crumbs: Vec<BreadcrumbItem>| -> Vec<String> {
            crumbs.into_iter().map(|c| c.label).collect()
        };

        assert_eq!(labels(shop_breadcrumb(&CatalogView::Root, None)), ["Shop", "All"]);
        assert_eq!(
            labels(shop_breadcrumb(
                &CatalogView::Collection("bags".into()),
                Some(&bags)
            )),
            ["Shop", "Bags"]
        );
        assert_eq!(
            labels(shop_breadcrumb(&CatalogView::Collection("hats".into()), None)),
            ["Shop"]
        );
    }

    #[test]
    fn test_page_links_keep_other_filters() {
        let bags = collection("bags", "Bags", seo("", ""), "");
        let filter = FilterState::from_query("sort=title&q=tote").unwrap();
        let session = ShopSession::new(CatalogView::Collection("bags".into()), filter);
        let page = ShopPage::new(&session, std::slice::from_ref(&bags));

        assert_eq!(page.clear_sort_href, "/shop/bags?q=tote");
        let selected: Vec<_> = page
            .sort_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.option.value)
            .collect();
        assert_eq!(selected, ["title"]);
        assert_eq!(page.sort_options[4].href, "/shop/bags?sort=price-desc&q=tote");
        assert!(page.categories[0].selected);
        assert_eq!(page.collection.unwrap().title, "Bags");
        assert_eq!(page.category_filter_count, 1);
    }

    #[tokio::test]
    async fn test_load_session_and_heal() {
        let catalog = Catalog::new(crate::shopify::MockCatalog::bundled().unwrap(), 100);
        let filter = FilterState::from_query("fcolor=Olive,Pink").unwrap();

        let (mut session, collections) =
            load_session(&catalog, CatalogView::Collection("jackets".into()), filter).await;
        assert_eq!(collections.len(), 5);
        assert_eq!(session.products().original().len(), 2);

        assert_eq!(
            settle_location(&mut session).as_deref(),
            Some("/shop/jackets?fcolor=Olive")
        );
        assert!(settle_location(&mut session).is_none());

        let page = ShopPage::new(&session, &collections);
        assert_eq!(page.results_count, 1);
        assert_eq!(page.products[0].handle, "field-jacket");
        assert_eq!(page.meta.title, "ACME Store | Jackets & Outerwear");
        let olive = page.available_colors.iter().find(|c| c.name == "Olive").unwrap();
        assert!(olive.selected);
        assert_eq!(olive.href, "/shop/jackets");
    }
}
