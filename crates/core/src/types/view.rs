//! Which slice of the catalog a shop page shows.

use serde::Serialize;

/// Category id used for the unfiltered "All" listing.
pub const ROOT_CATEGORY_ID: &str = "joyco-root";

/// Either the whole catalog or a single collection, by handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "handle", rename_all = "snake_case")]
pub enum CatalogView {
    Root,
    Collection(String),
}

impl CatalogView {
    /// Build a view from an optional path segment.
    ///
    /// A missing or blank segment, or the root sentinel, is the root view.
    #[must_use]
    pub fn from_segment(segment: Option<&str>) -> Self {
        match segment.map(str::trim) {
            None | Some("") => Self::Root,
            Some(id) if id == ROOT_CATEGORY_ID => Self::Root,
            Some(handle) => Self::Collection(handle.to_string()),
        }
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Collection handle, if any.
    #[must_use]
    pub fn handle(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Collection(handle) => Some(handle),
        }
    }

    /// Category id as used by the category filter.
    #[must_use]
    pub fn category_id(&self) -> &str {
        self.handle().unwrap_or(ROOT_CATEGORY_ID)
    }
}

/// Longest handle accepted in a URL.
pub const MAX_HANDLE_LEN: usize = 255;

/// Whether `handle` is a URL-safe slug: ASCII letters, digits, `-` and `_`.
#[must_use]
pub fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && handle.len() <= MAX_HANDLE_LEN
        && handle
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
