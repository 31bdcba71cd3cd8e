//! Core types for Notori.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Currency, CurrencyCode, ParseCurrencyError, Price};
pub use status::*;
