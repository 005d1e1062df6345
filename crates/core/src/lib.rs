//! Joyco Core - Shared catalog types.
//!
//! This crate provides the types shared by the storefront service and the CLI:
//! - `storefront` - Catalog adapter, backends, filter pipeline and HTTP routes
//! - `cli` - Command-line access to the catalog backends
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Money, colour palette, sort keys and catalog views

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
