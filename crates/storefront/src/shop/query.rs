//! Shop filter state and its query-string encoding.
//!
//! The query string is the only place filter state lives. Parsing and
//! encoding are inverse operations, so a healed state can be written straight
//! back to the URL and every filtered view is bookmarkable.
//!
//! ```text
//! ?sort=price-desc&q=jacket&fcolor=Olive,Navy%20Blue
//! ```

use std::borrow::Cow;

use joyco_core::{ProductCollectionSortKey, ProductSortKey, SortSpec, Swatch};
use serde::Serialize;
use thiserror::Error;

/// Sort parameter.
pub const SORT_PARAM: &str = "sort";
/// Free-text search parameter.
pub const SEARCH_PARAM: &str = "q";
/// Selected colours, comma separated.
pub const COLOR_PARAM: &str = "fcolor";

/// Errors decoding a query string.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid percent-encoding in `{param}`")]
    InvalidEncoding { param: String },
}

/// What the shop grid is currently sorted and filtered by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    /// Raw `sort` value. Resolved per view by [`Self::product_sort`] and
    /// [`Self::collection_sort`].
    pub sort: Option<String>,
    /// Free-text search.
    pub query: Option<String>,
    /// Selected colour names, in selection order.
    pub colors: Vec<String>,
}

impl FilterState {
    /// Parse a raw query string (without the leading `?`).
    ///
    /// Unknown parameters are ignored. For `sort` and `q` the first non-empty
    /// value wins. `fcolor` may be repeated and each value is a comma
    /// separated list; a comma inside a colour name is sent as `%2C`.
    ///
    /// # Errors
    ///
    /// Returns an error if a value does not decode to UTF-8.
    pub fn from_query(raw: &str) -> Result<Self, QueryError> {
        let mut state = Self::default();

        for pair in raw.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(key, key)?;

            match key.as_ref() {
                SORT_PARAM if state.sort.is_none() => state.sort = non_empty(decode(&key, value)?),
                SEARCH_PARAM if state.query.is_none() => {
                    state.query = non_empty(decode(&key, value)?);
                }
                COLOR_PARAM => {
                    for item in value.split(',') {
                        let color = decode(&key, item)?;
                        state.push_color(color.trim());
                    }
                }
                _ => {}
            }
        }

        Ok(state)
    }

    /// Encode as a query string without the leading `?`.
    ///
    /// Parameters are written in a fixed order so equal states encode
    /// identically.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut params = Vec::new();

        if let Some(sort) = &self.sort {
            params.push(format!("{SORT_PARAM}={}", urlencoding::encode(sort)));
        }
        if let Some(query) = &self.query {
            params.push(format!("{SEARCH_PARAM}={}", urlencoding::encode(query)));
        }
        if !self.colors.is_empty() {
            let colors: Vec<_> = self
                .colors
                .iter()
                .map(|c| urlencoding::encode(c))
                .collect();
            params.push(format!("{COLOR_PARAM}={}", colors.join(",")));
        }

        params.join("&")
    }

    /// `path` with this state appended, or bare `path` when nothing is set.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        let query = self.to_query();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }

    /// Whether a colour is selected, ignoring case.
    #[must_use]
    pub fn is_selected(&self, name: &str) -> bool {
        self.colors.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Select a swatch, or deselect it if already selected.
    pub fn toggle_color(&mut self, swatch: &Swatch) {
        let name = swatch.name();
        if self.is_selected(&name) {
            self.colors.retain(|c| !c.eq_ignore_ascii_case(&name));
        } else {
            self.colors.push(name);
        }
    }

    /// Copy of this state with a swatch toggled.
    #[must_use]
    pub fn with_color_toggled(&self, swatch: &Swatch) -> Self {
        let mut next = self.clone();
        next.toggle_color(swatch);
        next
    }

    /// Drop the explicit sort.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Sort for the whole-catalog listing.
    #[must_use]
    pub fn product_sort(&self) -> SortSpec<ProductSortKey> {
        SortSpec::for_products(self.sort.as_deref())
    }

    /// Sort for a collection listing.
    #[must_use]
    pub fn collection_sort(&self) -> SortSpec<ProductCollectionSortKey> {
        SortSpec::for_collection(self.sort.as_deref())
    }

    fn push_color(&mut self, color: &str) {
        if !color.is_empty() && !self.is_selected(color) {
            self.colors.push(color.to_string());
        }
    }
}

/// Percent-decode a form value (`+` is a space).
fn decode<'a>(param: &str, value: &'a str) -> Result<Cow<'a, str>, QueryError> {
    let err = || QueryError::InvalidEncoding {
        param: param.to_string(),
    };

    if value.contains('+') {
        let spaced = value.replace('+', " ");
        urlencoding::decode(&spaced)
            .map(|s| Cow::Owned(s.into_owned()))
            .map_err(|_| err())
    } else {
        urlencoding::decode(value).map_err(|_| err())
    }
}

fn non_empty(value: Cow<'_, str>) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
