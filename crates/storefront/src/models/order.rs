//! Checkout form and order values.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use notori_core::{Email, PaymentMethod};

use crate::cart::CartLedger;

/// Country preselected in address forms.
pub const DEFAULT_COUNTRY: &str = "United States";

/// A shipping or billing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub country: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: Option<String>,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            apartment: None,
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            phone: None,
        }
    }
}

impl Address {
    /// Push the names of blank required fields, prefixed with `section`.
    fn missing_fields(&self, section: &'static str, missing: &mut Vec<String>) {
        let required = [
            ("country", &self.country),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip_code", &self.zip_code),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                missing.push(format!("{section}.{name}"));
            }
        }
    }
}

/// Card fields for the credit card payment method.
///
/// Nothing is charged; the values are only checked for presence.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub number: SecretString,
    /// `MM / YY`
    pub expiration: String,
    pub security_code: SecretString,
    pub name_on_card: String,
}

impl CardDetails {
    fn missing_fields(&self, missing: &mut Vec<String>) {
        if self.number.expose_secret().trim().is_empty() {
            missing.push("card.number".to_string());
        }
        if self.expiration.trim().is_empty() {
            missing.push("card.expiration".to_string());
        }
        if self.security_code.expose_secret().trim().is_empty() {
            missing.push("card.security_code".to_string());
        }
        if self.name_on_card.trim().is_empty() {
            missing.push("card.name_on_card".to_string());
        }
    }
}

/// Everything the shopper fills in on the checkout page.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    /// Contact email.
    pub email: String,
    /// Opt-in to news and offers.
    pub email_offers: bool,
    pub shipping: Address,
    pub payment_method: PaymentMethod,
    /// Required when paying by credit card.
    pub card: Option<CardDetails>,
    /// When false, `billing` must be filled in.
    pub billing_same_as_shipping: bool,
    pub billing: Option<Address>,
    /// Save details for a faster checkout next time.
    pub remember_me: bool,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            email_offers: false,
            shipping: Address::default(),
            payment_method: PaymentMethod::default(),
            card: None,
            billing_same_as_shipping: true,
            billing: None,
            remember_me: true,
        }
    }
}

impl CheckoutForm {
    /// A blank form with the contact email prefilled.
    #[must_use]
    pub fn for_email(email: &Email) -> Self {
        Self {
            email: email.to_string(),
            ..Self::default()
        }
    }

    /// Names of required fields that are blank or malformed, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if Email::parse(&self.email).is_err() {
            missing.push("email".to_string());
        }
        self.shipping.missing_fields("shipping", &mut missing);

        if self.payment_method == PaymentMethod::CreditCard {
            match &self.card {
                Some(card) => card.missing_fields(&mut missing),
                None => missing.push("card".to_string()),
            }
        }

        if !self.billing_same_as_shipping {
            match &self.billing {
                Some(billing) => billing.missing_fields("billing", &mut missing),
                None => missing.push("billing".to_string()),
            }
        }

        missing
    }

    /// The address the order is billed to.
    #[must_use]
    pub fn billing_address(&self) -> &Address {
        if self.billing_same_as_shipping {
            &self.shipping
        } else {
            self.billing.as_ref().unwrap_or(&self.shipping)
        }
    }
}

/// Totals shown in the order summary column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    /// Always free in the demo store.
    pub shipping: Decimal,
    pub total: Decimal,
    pub item_count: u64,
}

impl CheckoutSummary {
    #[must_use]
    pub fn from_cart(cart: &CartLedger) -> Self {
        let subtotal = cart.subtotal();
        let shipping = Decimal::ZERO;
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
            item_count: cart.item_count(),
        }
    }
}

/// Receipt for a completed (mock) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    /// Shopper-facing order number, e.g. `#NY2-483920`.
    pub order_number: String,
    pub placed_at: DateTime<Utc>,
    pub summary: CheckoutSummary,
    pub payment_method: PaymentMethod,
    /// Where the confirmation would be sent; unknown for express checkout
    /// without a signed-in user.
    pub email: Option<Email>,
}
