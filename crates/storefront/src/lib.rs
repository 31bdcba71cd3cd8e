//! Notori Y2 storefront library.
//!
//! The shopper-facing core of the store: the product catalog, the cart
//! ledger, the wishlist, currency display, and the mock sign-in and checkout
//! flows. A [`Session`](state::Session) wires them together for one shopper.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod links;
pub mod models;
pub mod pricing;
pub mod services;
pub mod state;
pub mod wishlist;

pub use cart::{CartChange, CartLedger, LineItem};
pub use catalog::{Catalog, CatalogError, Product};
pub use config::{ConfigError, LogFormat, StorefrontConfig};
pub use error::{Result, StoreError};
pub use state::Session;
pub use wishlist::{Wishlist, WishlistChange};
