//! Unified error handling.
//!
//! Provides a unified `StoreError` type for the session layer. Every
//! fallible [`Session`](crate::state::Session) operation returns
//! `Result<T, StoreError>`; the ledger itself never fails.

use thiserror::Error;

use notori_core::ProductId;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A link could not be built.
    #[error("Link error: {0}")]
    Link(#[from] url::ParseError),

    /// No product with this id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product is sold out in every variant.
    #[error("Product {0} is sold out")]
    SoldOut(ProductId),

    /// The size/color combination is not offered or out of stock.
    #[error("Product {id} is unavailable in size {size}, color {color}")]
    VariantUnavailable {
        id: ProductId,
        size: String,
        color: String,
    },
}

impl StoreError {
    /// Whether the shopper can fix this by changing their input.
    ///
    /// Used by the shell to decide between a hint and an abort.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Auth(_)
                | Self::Checkout(_)
                | Self::ProductNotFound(_)
                | Self::SoldOut(_)
                | Self::VariantUnavailable { .. }
        )
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
