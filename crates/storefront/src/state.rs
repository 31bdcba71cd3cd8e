//! Shopper session state.
//!
//! A [`Session`] ties the catalog, cart, wishlist, currency choice, auth and
//! checkout together for one shopper. It is the only place that enforces
//! catalog rules (sold-out products, unavailable variants) before anything
//! reaches the ledger.

use std::sync::Arc;

use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::instrument;

use notori_core::{AuthProvider, CurrencyCode, PaymentMethod, ProductId, VariantKey};

use crate::cart::{CartChange, CartLedger};
use crate::catalog::{Catalog, Product};
use crate::config::StorefrontConfig;
use crate::error::{Result, StoreError};
use crate::links::Links;
use crate::models::order::{CheckoutForm, CheckoutSummary, OrderConfirmation};
use crate::models::user::User;
use crate::pricing::CurrencySelector;
use crate::services::{AuthService, CheckoutService};
use crate::wishlist::Wishlist;

/// One shopper's view of the store.
#[derive(Debug)]
pub struct Session {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    cart: CartLedger,
    wishlist: Wishlist,
    currency: CurrencySelector,
    auth: AuthService,
    checkout: CheckoutService,
    links: Links,
}

impl Session {
    /// Create a session, loading the catalog named in `config` or the
    /// embedded seed catalog.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Catalog` if the catalog cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::seeded()?,
        };
        Ok(Self::with_catalog(config, Arc::new(catalog)))
    }

    /// Create a session over an already-loaded catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Arc<Catalog>) -> Self {
        Self {
            cart: CartLedger::new(),
            wishlist: Wishlist::new(),
            currency: CurrencySelector::new(config.currency),
            auth: AuthService::new(config.auth_delay),
            checkout: CheckoutService::new(config.payment_delay),
            links: Links::new(config.store_url.clone()),
            catalog,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartLedger {
        &self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    #[must_use]
    pub const fn currency(&self) -> &CurrencySelector {
        &self.currency
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[must_use]
    pub const fn links(&self) -> &Links {
        &self.links
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProductNotFound` for unknown ids.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` units of a product to the cart.
    ///
    /// Missing size or color falls back to the product's preselected
    /// options. A quantity of zero changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProductNotFound` for unknown ids,
    /// `StoreError::SoldOut` for sold-out products and
    /// `StoreError::VariantUnavailable` for combinations that cannot be bought.
    #[instrument(skip(self))]
    pub fn add_to_cart(
        &mut self,
        id: &ProductId,
        size: Option<&str>,
        color: Option<&str>,
        quantity: u32,
    ) -> Result<CartChange> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;
        if product.sold_out {
            return Err(StoreError::SoldOut(id.clone()));
        }

        let options = product.variant_options();
        let size = size.filter(|s| !s.is_empty()).unwrap_or(options.default_size);
        let color = color.filter(|c| !c.is_empty()).unwrap_or(options.default_color);
        if !product.is_variant_available(size, color) {
            return Err(StoreError::VariantUnavailable {
                id: id.clone(),
                size: size.to_string(),
                color: color.to_string(),
            });
        }

        if quantity == 0 {
            return Ok(CartChange::Unchanged);
        }
        let change = self.cart.add(product, Some(size), Some(color));
        if quantity == 1 {
            return Ok(change);
        }

        // One merge, then jump straight to the final quantity.
        let key = VariantKey::derive(id, Some(size), Some(color));
        let current = self.cart.get(&key).map_or(1, |item| item.quantity);
        let target = current.saturating_add(quantity - 1);
        Ok(self.cart.update_quantity(&key, i64::from(target)))
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn update_quantity(&mut self, key: &VariantKey, quantity: i64) -> CartChange {
        self.cart.update_quantity(key, quantity)
    }

    pub fn remove_from_cart(&mut self, key: &VariantKey) -> CartChange {
        self.cart.remove_item(key)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Save or unsave a product. Returns whether it is now saved.
    ///
    /// Sold-out products can be saved.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProductNotFound` for unknown ids.
    pub fn toggle_wishlist(&mut self, id: &ProductId) -> Result<bool> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;
        Ok(self.wishlist.toggle(product))
    }

    // =========================================================================
    // Currency
    // =========================================================================

    pub fn select_currency(&mut self, code: CurrencyCode) {
        self.currency.select(code);
    }

    /// Format a base-currency amount in the selected currency.
    #[must_use]
    pub fn format_price(&self, base_amount: Decimal) -> String {
        self.currency.format(base_amount)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// # Errors
    ///
    /// Returns `StoreError::Auth` if the email or password is rejected.
    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Result<User> {
        Ok(self.auth.sign_in(email, password).await?)
    }

    /// # Errors
    ///
    /// Returns `StoreError::Auth` if any field is rejected.
    pub async fn sign_up(&self, email: &str, password: &SecretString, name: &str) -> Result<User> {
        Ok(self.auth.sign_up(email, password, name).await?)
    }

    /// # Errors
    ///
    /// Returns `StoreError::Auth` for non-social providers.
    pub async fn sign_in_with_provider(&self, provider: AuthProvider) -> Result<User> {
        Ok(self.auth.sign_in_with_provider(provider).await?)
    }

    pub fn sign_out(&self) {
        self.auth.sign_out();
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Totals for the current cart.
    #[must_use]
    pub fn checkout_summary(&self) -> CheckoutSummary {
        CheckoutSummary::from_cart(&self.cart)
    }

    /// A checkout form with the signed-in user's email filled in.
    #[must_use]
    pub fn checkout_form(&self) -> CheckoutForm {
        self.auth
            .user()
            .map_or_else(CheckoutForm::default, |user| CheckoutForm::for_email(&user.email))
    }

    /// Place an order and empty the cart once it is confirmed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Checkout` if the cart is empty or the form is
    /// incomplete. The cart is left untouched on error.
    #[instrument(skip_all)]
    pub async fn place_order(&mut self, form: &CheckoutForm) -> Result<OrderConfirmation> {
        let confirmation = self.checkout.place_order(&self.cart, form).await?;
        self.cart.clear();
        Ok(confirmation)
    }

    /// Express checkout, confirming to the signed-in user's email if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Checkout` if the cart is empty or `method` is not
    /// an express method.
    #[instrument(skip(self))]
    pub async fn express_checkout(&mut self, method: PaymentMethod) -> Result<OrderConfirmation> {
        let email = self.auth.user().map(|user| user.email);
        let confirmation = self
            .checkout
            .express_checkout(&self.cart, method, email)
            .await?;
        self.cart.clear();
        Ok(confirmation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;
    use crate::config::LogFormat;
    use crate::services::CheckoutError;

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            currency: CurrencyCode::USD,
            auth_delay: Duration::ZERO,
            payment_delay: Duration::ZERO,
            catalog_path: None,
            store_url: Url::parse("https://notori.y2.com").unwrap(),
            log_format: LogFormat::Pretty,
        }
    }

    fn session() -> Session {
        Session::new(config()).unwrap()
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_applies_default_variant() {
        let mut session = session();
        let change = session.add_to_cart(&id("4"), None, None, 1).unwrap();

        let key = VariantKey::from("4-MEDIUM-Regent St Blue");
        assert_eq!(change, CartChange::Added { key: key.clone() });
        let item = session.cart().get(&key).unwrap();
        assert_eq!(item.selected_size.as_deref(), Some("MEDIUM"));
        assert_eq!(item.selected_color.as_deref(), Some("Regent St Blue"));
    }

    #[test]
    fn test_add_many_units_merges_into_one_line() {
        let mut session = session();
        let change = session.add_to_cart(&id("1"), Some("LARGE"), None, 3).unwrap();

        assert_eq!(
            change,
            CartChange::QuantitySet {
                key: VariantKey::from("1-LARGE-Regent St Blue"),
                quantity: 3,
            }
        );
        assert_eq!(session.cart().len(), 1);
        assert_eq!(session.cart().item_count(), 3);
        assert_eq!(session.checkout_summary().subtotal, Decimal::from(267));

        session.add_to_cart(&id("1"), Some("LARGE"), None, 2).unwrap();
        assert_eq!(session.cart().len(), 1);
        assert_eq!(session.cart().item_count(), 5);
    }

    #[test]
    fn test_add_max_units_saturates_in_one_step() {
        let mut session = session();
        let mut changes = session.cart().subscribe();
        let key = VariantKey::from("1-LARGE-Regent St Blue");

        session
            .add_to_cart(&id("1"), Some("LARGE"), None, u32::MAX)
            .unwrap();
        assert_eq!(session.cart().get(&key).unwrap().quantity, u32::MAX);

        let change = session
            .add_to_cart(&id("1"), Some("LARGE"), None, u32::MAX)
            .unwrap();
        assert_eq!(session.cart().get(&key).unwrap().quantity, u32::MAX);
        assert_eq!(
            change,
            CartChange::QuantitySet {
                key: key.clone(),
                quantity: u32::MAX,
            }
        );

        let mut received = 0;
        while changes.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, 4);
    }

    #[test]
    fn test_add_zero_units_is_a_no_op() {
        let mut session = session();
        let change = session.add_to_cart(&id("1"), None, None, 0).unwrap();
        assert_eq!(change, CartChange::Unchanged);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_add_rejects_catalog_violations() {
        let mut session = session();

        let err = session.add_to_cart(&id("999"), None, None, 1).unwrap_err();
        assert!(matches!(err, StoreError::ProductNotFound(_)));

        let err = session.add_to_cart(&id("3"), None, None, 1).unwrap_err();
        assert!(matches!(err, StoreError::SoldOut(_)));

        let err = session
            .add_to_cart(&id("4"), Some("MEDIUM"), Some("Forest Green"), 1)
            .unwrap_err();
        assert!(matches!(err, StoreError::VariantUnavailable { .. }));

        let err = session
            .add_to_cart(&id("4"), Some("XXL"), None, 1)
            .unwrap_err();
        assert!(matches!(err, StoreError::VariantUnavailable { .. }));

        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_wishlist_toggle_allows_sold_out() {
        let mut session = session();
        assert!(session.toggle_wishlist(&id("3")).unwrap());
        assert!(session.wishlist().contains(&id("3")));
        assert!(!session.toggle_wishlist(&id("3")).unwrap());
        assert!(session.wishlist().is_empty());
    }

    #[test]
    fn test_format_price_follows_selected_currency() {
        let mut session = session();
        session.select_currency(CurrencyCode::EUR);
        assert_eq!(session.format_price(Decimal::from(45)), "€38.25");
    }

    #[test]
    fn test_catalog_path_that_does_not_exist() {
        let config = StorefrontConfig {
            catalog_path: Some("/nonexistent/catalog.json".into()),
            ..config()
        };
        let err = Session::new(config).unwrap_err();
        assert!(matches!(err, StoreError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_checkout_form_prefilled_after_sign_in() {
        let session = session();
        assert!(session.checkout_form().email.is_empty());

        session
            .sign_in("jordan@example.com", &SecretString::from("pw"))
            .await
            .unwrap();
        assert_eq!(session.checkout_form().email, "jordan@example.com");
    }

    #[tokio::test]
    async fn test_express_checkout_clears_cart() {
        let mut session = session();
        session
            .sign_in_with_provider(AuthProvider::Google)
            .await
            .unwrap();
        session.add_to_cart(&id("4"), None, None, 2).unwrap();

        let confirmation = session
            .express_checkout(PaymentMethod::GooglePay)
            .await
            .unwrap();

        assert_eq!(confirmation.summary.total, Decimal::from(90));
        assert_eq!(confirmation.email.unwrap().as_str(), "user@google.com");
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_cart() {
        let mut session = session();
        session.add_to_cart(&id("4"), None, None, 1).unwrap();

        let form = session.checkout_form();
        let err = session.place_order(&form).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Checkout(CheckoutError::Incomplete { .. })
        ));
        assert_eq!(session.cart().len(), 1);
    }
}
