//! Integration tests for the Notori Y2 storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p notori-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_ledger` - Cart and wishlist ledger behavior through the public API
//! - `shopping_session` - Browse, sign in and check out end to end
//!
//! Helpers here build sessions over the embedded seed catalog with the mock
//! delays zeroed, unless a test wants to observe them.

use std::time::Duration;

use notori_core::{ProductCategory, ProductId};
use notori_storefront::catalog::Product;
use notori_storefront::{Session, StorefrontConfig};
use rust_decimal::Decimal;

/// Configuration with defaults and no simulated latency.
///
/// # Panics
///
/// Panics if the default configuration fails to parse.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    let mut config = StorefrontConfig::from_lookup(|_| None).expect("default config");
    config.auth_delay = Duration::ZERO;
    config.payment_delay = Duration::ZERO;
    config
}

/// A session over the seed catalog.
///
/// # Panics
///
/// Panics if the seed catalog fails to load.
#[must_use]
pub fn test_session() -> Session {
    Session::new(test_config()).expect("seed catalog")
}

/// A throwaway product that is not in any catalog.
#[must_use]
pub fn product(id: &str, price: i64, category: ProductCategory) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Test product {id}"),
        price: Decimal::from(price),
        image: String::new(),
        category,
        sold_out: false,
    }
}
