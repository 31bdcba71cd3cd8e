//! Subcommand implementations.

pub mod browse;
pub mod shop;

use thiserror::Error;

use notori_storefront::StoreError;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Writing output or reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A storefront operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
