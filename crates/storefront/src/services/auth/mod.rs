//! Mock authentication service.
//!
//! Every well-formed request succeeds after a short simulated delay; there is
//! no user store and nothing outlives the session. The current status is
//! published on a `watch` channel so a view can show a spinner while a call
//! is in flight.

mod error;

pub use error::AuthError;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;
use tracing::instrument;
use uuid::Uuid;

use notori_core::{AuthProvider, Email, UserId};

use crate::models::user::{AuthStatus, User};

/// Stock avatar given to social sign-ins.
const SOCIAL_AVATAR_URL: &str = "https://images.pexels.com/photos/1040881/pexels-photo-1040881.jpeg?auto=compress&cs=tinysrgb&w=100&h=100&fit=crop&crop=face";

/// Authentication service.
#[derive(Debug)]
pub struct AuthService {
    delay: Duration,
    status: watch::Sender<AuthStatus>,
}

impl AuthService {
    /// Create a signed-out service that waits `delay` on each sign-in.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let (status, _) = watch::channel(AuthStatus::SignedOut);
        Self { delay, status }
    }

    /// Watch status transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.status.borrow().user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status.borrow().user().is_some()
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Sign in with email and password.
    ///
    /// The display name is taken from the email mailbox.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::MissingPassword` if the password is blank.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        require_password(password)?;

        let name = email.mailbox().to_string();
        let user = self
            .complete(User {
                id: new_user_id(),
                email,
                name,
                avatar: None,
                provider: AuthProvider::Email,
            })
            .await;
        Ok(user)
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::MissingPassword` if the password is blank.
    /// Returns `AuthError::MissingName` if the name is blank.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
        name: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        require_password(password)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }

        let user = self
            .complete(User {
                id: new_user_id(),
                email,
                name: name.to_string(),
                avatar: None,
                provider: AuthProvider::Email,
            })
            .await;
        Ok(user)
    }

    // =========================================================================
    // Social Authentication
    // =========================================================================

    /// One-click sign-in with a social provider.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnsupportedProvider` for [`AuthProvider::Email`].
    #[instrument(skip(self))]
    pub async fn sign_in_with_provider(&self, provider: AuthProvider) -> Result<User, AuthError> {
        if !provider.is_social() {
            return Err(AuthError::UnsupportedProvider(provider));
        }
        let email = Email::parse(&format!("user@{provider}.com"))?;

        let user = self
            .complete(User {
                id: new_user_id(),
                email,
                name: format!("{} User", provider.label()),
                avatar: Some(SOCIAL_AVATAR_URL.to_string()),
                provider,
            })
            .await;
        Ok(user)
    }

    /// Sign out. Does nothing when already signed out.
    pub fn sign_out(&self) {
        let was_signed_in = self.status.send_if_modified(|status| {
            let changed = !matches!(status, AuthStatus::SignedOut);
            *status = AuthStatus::SignedOut;
            changed
        });
        if was_signed_in {
            tracing::info!("Signed out");
        }
    }

    /// Publish `Loading`, wait out the simulated latency, then sign `user` in.
    async fn complete(&self, user: User) -> User {
        self.status.send_replace(AuthStatus::Loading);
        tokio::time::sleep(self.delay).await;
        self.status.send_replace(AuthStatus::SignedIn(user.clone()));
        tracing::info!(user_id = %user.id, provider = %user.provider, "Signed in");
        user
    }
}

fn require_password(password: &SecretString) -> Result<(), AuthError> {
    if password.expose_secret().is_empty() {
        return Err(AuthError::MissingPassword);
    }
    Ok(())
}

fn new_user_id() -> UserId {
    UserId::new(Uuid::new_v4().to_string())
}
