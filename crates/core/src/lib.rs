//! GlowBeauty Core - Shared types library.
//!
//! This crate provides common types used across all GlowBeauty components:
//! - `storefront` - Catalog and cart/favorites state
//! - `integration-tests` - Cross-crate scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
