//! Core types for the Joyco storefront.
//!
//! This module provides type-safe wrappers for common catalog concepts.

pub mod color;
pub mod money;
pub mod sort;
pub mod view;

pub use color::{Color, PALETTE, Swatch, find_in_palette};
pub use money::Money;
pub use sort::{ProductCollectionSortKey, ProductSortKey, SORT_OPTIONS, SortField, SortOption, SortSpec};
pub use view::{CatalogView, MAX_HANDLE_LEN, ROOT_CATEGORY_ID, is_valid_handle};
