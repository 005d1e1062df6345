//! Conversion from upstream payloads to catalog domain types.
//!
//! Every function here is total: missing or malformed upstream fields turn
//! into documented defaults instead of errors.

mod collections;
mod images;
mod products;
mod text;

pub use collections::adapt_collection;
pub use images::{adapt_image, thumbhash_to_data_url};
pub use products::adapt_product;
pub use text::{first_sentence, slugify_option};
