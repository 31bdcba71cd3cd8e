//! Domain models for the storefront.
//!
//! These are plain values handed between the services and the view layer.

pub mod order;
pub mod user;

pub use order::{Address, CardDetails, CheckoutForm, CheckoutSummary, OrderConfirmation};
pub use user::{AuthStatus, User};
