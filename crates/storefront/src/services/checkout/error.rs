//! Checkout error types.

use thiserror::Error;

use notori_core::PaymentMethod;

/// Errors that stop an order from being placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to pay for.
    #[error("cart is empty")]
    EmptyCart,

    /// Required form fields are blank or malformed.
    #[error("missing or invalid fields: {}", .fields.join(", "))]
    Incomplete {
        /// Field names in form order, e.g. `shipping.city`.
        fields: Vec<String>,
    },

    /// Express checkout was asked to use a form-based method.
    #[error("{0} is not an express payment method")]
    NotExpress(PaymentMethod),
}
