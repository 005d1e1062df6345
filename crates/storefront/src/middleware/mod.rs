//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Cache-Control (shared caches may keep pages for a minute)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
