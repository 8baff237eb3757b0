//! Integration tests for GlowBeauty.
//!
//! These tests exercise the catalog and the cart/favorites store
//! together, joining them the way the presentation layer would - the two
//! never call into each other directly.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p glow-beauty-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_lifecycle` - Persistence across store sessions
//! - `catalog_queries` - Catalog reads and catalog/store joins

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a tracing subscriber for test output, once per process.
///
/// Defaults to debug-level events from the storefront crate; override
/// with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "glow_beauty_storefront=debug".into()),
            )
            .with_test_writer()
            .init();
    });
}
