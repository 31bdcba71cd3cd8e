//! Notori Core - Shared domain types.
//!
//! This crate provides the types shared by the Notori components:
//! - `storefront` - Catalog, cart and wishlist ledgers, mock auth and checkout
//! - `cli` - The `notori` binary and its shopping shell
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no clocks, no async runtime.
//! Everything here is a value that can be cloned, compared and serialized.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and currencies, emails, and
//!   the closed enums used across the storefront

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
