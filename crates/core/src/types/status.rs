//! Closed enums shared across the storefront.

use serde::{Deserialize, Serialize};

/// Product category, used for display filtering and variant options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Shirts, tees, hoodies. Sized SMALL/MEDIUM/LARGE.
    Top,
    /// Shorts and trousers. Sized by waist.
    Bottom,
    /// Belts, hats.
    Accessory,
}

impl ProductCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Top, Self::Bottom, Self::Accessory];
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
            Self::Accessory => write!(f, "accessory"),
        }
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "tops" => Ok(Self::Top),
            "bottom" | "bottoms" => Ok(Self::Bottom),
            "accessory" | "accessories" => Ok(Self::Accessory),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// How a shopper signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    /// Email and password.
    #[default]
    Email,
    Google,
    Facebook,
    Instagram,
}

impl AuthProvider {
    /// Capitalised provider name for display ("Google").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Google => "Google",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
        }
    }

    /// Whether this is a social (one-click) provider.
    #[must_use]
    pub const fn is_social(self) -> bool {
        !matches!(self, Self::Email)
    }
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Google => write!(f, "google"),
            Self::Facebook => write!(f, "facebook"),
            Self::Instagram => write!(f, "instagram"),
        }
    }
}

impl std::str::FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "google" => Ok(Self::Google),
            "facebook" => Ok(Self::Facebook),
            "instagram" => Ok(Self::Instagram),
            _ => Err(format!("invalid auth provider: {s}")),
        }
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    PayPal,
    /// Express checkout, skips the address form.
    ShopPay,
    /// Express checkout, skips the address form.
    GooglePay,
}

impl PaymentMethod {
    /// Express methods complete without the checkout form.
    #[must_use]
    pub const fn is_express(self) -> bool {
        matches!(self, Self::ShopPay | Self::GooglePay)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreditCard => write!(f, "credit_card"),
            Self::PayPal => write!(f, "paypal"),
            Self::ShopPay => write!(f, "shop_pay"),
            Self::GooglePay => write!(f, "google_pay"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit_card" | "card" => Ok(Self::CreditCard),
            "paypal" => Ok(Self::PayPal),
            "shop_pay" | "shoppay" => Ok(Self::ShopPay),
            "google_pay" | "googlepay" => Ok(Self::GooglePay),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
