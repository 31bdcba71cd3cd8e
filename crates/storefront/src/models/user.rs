//! Shopper identity.

use serde::Serialize;

use notori_core::{AuthProvider, Email, UserId};

/// A signed-in shopper.
///
/// Sign-in is mocked, so nothing here is verified against a user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    /// Display name shown in the header.
    pub name: String,
    /// Avatar image URL, set for social sign-ins.
    pub avatar: Option<String>,
    pub provider: AuthProvider,
}

/// Where the shopper is in the sign-in flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    SignedOut,
    /// A sign-in or sign-up call is in flight.
    Loading,
    SignedIn(User),
}

impl AuthStatus {
    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            Self::SignedOut | Self::Loading => None,
        }
    }
}
