//! Mock checkout service.
//!
//! Validates the order, waits a simulated payment delay and hands back a
//! confirmation. No money moves and no order is stored. The cart is read, not
//! modified; clearing it after a confirmed order is up to the caller.

mod error;

pub use error::CheckoutError;

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tracing::instrument;

use notori_core::{Email, PaymentMethod};

use crate::cart::CartLedger;
use crate::models::order::{CheckoutForm, CheckoutSummary, OrderConfirmation};

/// Prefix of generated order numbers.
const ORDER_NUMBER_PREFIX: &str = "#NY2-";

/// Checkout service.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    payment_delay: Duration,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(payment_delay: Duration) -> Self {
        Self { payment_delay }
    }

    /// Place an order from the checkout form.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines.
    /// Returns `CheckoutError::Incomplete` listing blank or malformed fields.
    #[instrument(skip_all, fields(method = %form.payment_method))]
    pub async fn place_order(
        &self,
        cart: &CartLedger,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let summary = summarize(cart)?;

        let fields = form.missing_fields();
        if !fields.is_empty() {
            tracing::debug!(?fields, "Checkout form incomplete");
            return Err(CheckoutError::Incomplete { fields });
        }
        let email = Email::parse(&form.email).ok();

        Ok(self.pay(summary, form.payment_method, email).await)
    }

    /// One-click checkout with Shop Pay or Google Pay, skipping the form.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotExpress` for form-based payment methods.
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines.
    #[instrument(skip(self, cart, email))]
    pub async fn express_checkout(
        &self,
        cart: &CartLedger,
        method: PaymentMethod,
        email: Option<Email>,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if !method.is_express() {
            return Err(CheckoutError::NotExpress(method));
        }
        let summary = summarize(cart)?;
        Ok(self.pay(summary, method, email).await)
    }

    async fn pay(
        &self,
        summary: CheckoutSummary,
        payment_method: PaymentMethod,
        email: Option<Email>,
    ) -> OrderConfirmation {
        tokio::time::sleep(self.payment_delay).await;

        let confirmation = OrderConfirmation {
            order_number: new_order_number(),
            placed_at: Utc::now(),
            summary,
            payment_method,
            email,
        };
        tracing::info!(
            order_number = %confirmation.order_number,
            total = %confirmation.summary.total,
            items = confirmation.summary.item_count,
            "Order placed"
        );
        confirmation
    }
}

fn summarize(cart: &CartLedger) -> Result<CheckoutSummary, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(CheckoutSummary::from_cart(cart))
}

fn new_order_number() -> String {
    let n: u32 = rand::rng().random_range(100_000..1_000_000);
    format!("{ORDER_NUMBER_PREFIX}{n}")
}
