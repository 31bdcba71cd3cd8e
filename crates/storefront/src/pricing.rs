//! Display pricing in the shopper's chosen currency.

use rust_decimal::Decimal;

use notori_core::{Currency, CurrencyCode, Price};

/// The currency currently selected in the storefront header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrencySelector {
    selected: CurrencyCode,
}

impl CurrencySelector {
    #[must_use]
    pub const fn new(selected: CurrencyCode) -> Self {
        Self { selected }
    }

    /// Every currency the selector offers.
    #[must_use]
    pub fn currencies() -> Vec<Currency> {
        CurrencyCode::ALL.iter().map(|code| code.currency()).collect()
    }

    #[must_use]
    pub const fn selected(&self) -> Currency {
        self.selected.currency()
    }

    pub fn select(&mut self, code: CurrencyCode) {
        tracing::debug!(from = %self.selected, to = %code, "Currency selected");
        self.selected = code;
    }

    /// Convert a base-currency amount, rounded to cents.
    #[must_use]
    pub fn convert(&self, base_amount: Decimal) -> Decimal {
        Price::base(base_amount).convert(self.selected).amount
    }

    /// Convert and render with the currency symbol, e.g. `£32.85`.
    #[must_use]
    pub fn format(&self, base_amount: Decimal) -> String {
        Price::base(base_amount).convert(self.selected).display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_usd() {
        let selector = CurrencySelector::default();
        assert_eq!(selector.selected().code, CurrencyCode::USD);
        assert_eq!(selector.format(Decimal::from(179)), "$179.00");
    }

    #[test]
    fn test_select_changes_formatting() {
        let mut selector = CurrencySelector::default();
        selector.select(CurrencyCode::GBP);
        assert_eq!(selector.format(Decimal::from(45)), "£32.85");
        assert_eq!(selector.convert(Decimal::from(45)), Decimal::new(3285, 2));

        selector.select(CurrencyCode::AUD);
        assert_eq!(selector.format(Decimal::from(125)), "A$168.75");
    }

    #[test]
    fn test_currency_list_order() {
        let codes: Vec<&str> = CurrencySelector::currencies()
            .iter()
            .map(|c| c.code.code())
            .collect();
        assert_eq!(codes, vec!["USD", "EUR", "GBP", "ZAR", "JPY", "CAD", "AUD"]);
    }
}
