//! Shop filter pipeline.
//!
//! ```text
//! query string ──> FilterState ──> Catalog fetch ──> ProductsState
//!                      ^                                   │
//!                      └──── settle() ◄── available colours┘
//! ```
//!
//! - [`query`] - `FilterState` and its URL encoding
//! - [`colors`] - Colours offered by a product list
//! - [`filter`] - Colour filtering
//! - [`products`] - Original and filtered product lists
//! - [`session`] - Ties the above together for one page

pub mod colors;
pub mod filter;
pub mod products;
pub mod query;
pub mod session;

pub use colors::{available_colors, retain_available, selected_colors};
pub use filter::filter_by_colors;
pub use products::ProductsState;
pub use query::{FilterState, QueryError};
pub use session::ShopSession;
