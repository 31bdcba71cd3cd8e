//! Type-safe price representation using decimal arithmetic.
//!
//! All catalog prices are stored in the base currency (USD). Display prices in
//! other currencies are produced by multiplying with a static exchange rate,
//! there is no live rate source.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the base currency.
    #[must_use]
    pub const fn base(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::BASE)
    }

    /// Convert a base-currency price into `target`.
    ///
    /// The converted amount is rounded to two decimal places, midpoints away
    /// from zero. Converting a price that is not in the base currency first
    /// normalizes it back to the base currency.
    #[must_use]
    pub fn convert(&self, target: CurrencyCode) -> Self {
        if self.currency_code == target {
            return *self;
        }
        let base = if self.currency_code == CurrencyCode::BASE {
            self.amount
        } else {
            self.amount / self.currency_code.rate()
        };
        Self::new(round_cents(base * target.rate()), target)
    }

    /// Format for display (e.g., "€38.25", "¥4950.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            round_cents(self.amount)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// ISO 4217 currency codes supported by the currency selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    ZAR,
    JPY,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// The currency catalog prices are denominated in.
    pub const BASE: Self = Self::USD;

    /// Every supported currency, in selector order.
    pub const ALL: [Self; 7] = [
        Self::USD,
        Self::EUR,
        Self::GBP,
        Self::ZAR,
        Self::JPY,
        Self::CAD,
        Self::AUD,
    ];

    /// The three-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::ZAR => "ZAR",
            Self::JPY => "JPY",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    /// The display symbol prefixed to formatted amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::ZAR => "R",
            Self::JPY => "¥",
            Self::CAD => "C$",
            Self::AUD => "A$",
        }
    }

    /// Static exchange rate: units of this currency per one base unit.
    #[must_use]
    pub const fn rate(self) -> Decimal {
        match self {
            Self::USD => Decimal::ONE,
            Self::EUR => Decimal::from_parts(85, 0, 0, false, 2),
            Self::GBP => Decimal::from_parts(73, 0, 0, false, 2),
            Self::ZAR => Decimal::from_parts(1850, 0, 0, false, 2),
            Self::JPY => Decimal::from_parts(110, 0, 0, false, 0),
            Self::CAD => Decimal::from_parts(125, 0, 0, false, 2),
            Self::AUD => Decimal::from_parts(135, 0, 0, false, 2),
        }
    }

    /// Full currency record for this code.
    #[must_use]
    pub const fn currency(self) -> Currency {
        Currency {
            code: self,
            symbol: self.symbol(),
            rate: self.rate(),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a currency code is not supported.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency: {0}")]
pub struct ParseCurrencyError(pub String);

impl FromStr for CurrencyCode {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|code| code.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCurrencyError(s.to_owned()))
    }
}

/// A currency as shown in the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    /// ISO 4217 code.
    pub code: CurrencyCode,
    /// Display symbol.
    pub symbol: &'static str,
    /// Units per one base-currency unit.
    pub rate: Decimal,
}
