//! Authentication error types.

use thiserror::Error;

use notori_core::AuthProvider;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] notori_core::EmailError),

    /// Password left blank.
    #[error("password is required")]
    MissingPassword,

    /// Sign-up name left blank.
    #[error("name is required")]
    MissingName,

    /// Provider cannot be used for one-click sign-in.
    #[error("{0} is not a social sign-in provider")]
    UnsupportedProvider(AuthProvider),
}
