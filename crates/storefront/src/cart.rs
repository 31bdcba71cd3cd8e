//! Cart ledger.
//!
//! The cart holds one [`LineItem`] per [`VariantKey`]. Adding a product that
//! is already in the cart with the same size and color bumps its quantity
//! instead of creating a second line. Line order is insertion order, so the
//! cart renders stably while quantities change.
//!
//! No ledger operation can fail. Out-of-range input folds into ordinary
//! behavior: a quantity of zero or less removes the line, and an unknown key
//! leaves the cart untouched.
//!
//! Every mutation returns a [`CartChange`] and publishes the same value to
//! subscribers obtained from [`CartLedger::subscribe`], so a view can redraw
//! without polling. No-ops are returned but never published.

use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::broadcast;

use notori_core::{Price, ProductCategory, ProductId, VariantKey};

use crate::catalog::Product;

/// Buffered change notifications per subscriber before it starts lagging.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// One line of the cart: a product snapshot, the chosen variant, and a count.
///
/// Product fields are copied when the line is created; later catalog edits
/// do not reprice lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub variant_key: VariantKey,
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in the base currency.
    pub price: Decimal,
    pub image: String,
    pub category: ProductCategory,
    /// Always at least 1 while the line is in the cart.
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
}

impl LineItem {
    fn new(variant_key: VariantKey, product: &Product, size: Option<&str>, color: Option<&str>) -> Self {
        Self {
            variant_key,
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category,
            quantity: 1,
            selected_size: chosen(size),
            selected_color: chosen(color),
        }
    }

    /// `price * quantity` in the base currency.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Unit price as a base-currency [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::base(self.price)
    }

    /// Human-readable variant, e.g. "MEDIUM / Forest Green".
    #[must_use]
    pub fn variant_label(&self) -> Option<String> {
        match (self.selected_size.as_deref(), self.selected_color.as_deref()) {
            (Some(size), Some(color)) => Some(format!("{size} / {color}")),
            (Some(only), None) | (None, Some(only)) => Some(only.to_owned()),
            (None, None) => None,
        }
    }
}

/// Empty selections are treated as "not chosen".
fn chosen(selection: Option<&str>) -> Option<String> {
    selection.filter(|s| !s.is_empty()).map(str::to_owned)
}

/// What a cart mutation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartChange {
    /// A new line was appended with quantity 1.
    Added { key: VariantKey },
    /// An existing line's quantity went up by one.
    Incremented { key: VariantKey, quantity: u32 },
    /// An existing line's quantity was replaced.
    QuantitySet { key: VariantKey, quantity: u32 },
    /// A line left the cart.
    Removed { key: VariantKey },
    /// Every line left the cart.
    Cleared,
    /// Nothing matched; the cart is as it was.
    Unchanged,
}

/// The shopper's cart.
#[derive(Debug)]
pub struct CartLedger {
    items: Vec<LineItem>,
    changes: broadcast::Sender<CartChange>,
}

impl Default for CartLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CartLedger {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            items: Vec::new(),
            changes,
        }
    }

    /// Receive every change made after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartChange> {
        self.changes.subscribe()
    }

    /// Add one unit of `product` with the given size and color.
    ///
    /// Merges into the existing line for the same variant key, otherwise
    /// appends a new line.
    pub fn add(&mut self, product: &Product, size: Option<&str>, color: Option<&str>) -> CartChange {
        let key = VariantKey::derive(&product.id, size, color);

        let change = if let Some(item) = self.find_mut(&key) {
            item.quantity = item.quantity.saturating_add(1);
            CartChange::Incremented {
                quantity: item.quantity,
                key,
            }
        } else {
            self.items.push(LineItem::new(key.clone(), product, size, color));
            CartChange::Added { key }
        };

        tracing::debug!(?change, "Cart add");
        self.publish(change)
    }

    /// Set the quantity of the line with `key`.
    ///
    /// A quantity of zero or less removes the line. Unknown keys are ignored.
    pub fn update_quantity(&mut self, key: &VariantKey, quantity: i64) -> CartChange {
        if quantity <= 0 {
            return self.remove_item(key);
        }

        let Some(item) = self.find_mut(key) else {
            return CartChange::Unchanged;
        };
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let change = CartChange::QuantitySet {
            key: key.clone(),
            quantity: item.quantity,
        };
        tracing::debug!(?change, "Cart quantity update");
        self.publish(change)
    }

    /// Remove the line with `key`, if present.
    pub fn remove_item(&mut self, key: &VariantKey) -> CartChange {
        let before = self.items.len();
        self.items.retain(|item| &item.variant_key != key);
        if self.items.len() == before {
            return CartChange::Unchanged;
        }

        let change = CartChange::Removed { key: key.clone() };
        tracing::debug!(?change, "Cart remove");
        self.publish(change)
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> CartChange {
        if self.items.is_empty() {
            return CartChange::Unchanged;
        }
        self.items.clear();
        tracing::debug!("Cart cleared");
        self.publish(CartChange::Cleared)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line with `key`, if present.
    #[must_use]
    pub fn get(&self, key: &VariantKey) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.variant_key == key)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price * quantity` over all lines, in the base currency.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    fn find_mut(&mut self, key: &VariantKey) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| &item.variant_key == key)
    }

    fn publish(&self, change: CartChange) -> CartChange {
        // Err only means nobody is subscribed.
        let _ = self.changes.send(change.clone());
        change
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::from(price),
            image: format!("/products/{id}.jpeg"),
            category: ProductCategory::Top,
            sold_out: false,
        }
    }

    fn key(s: &str) -> VariantKey {
        VariantKey::from(s)
    }

    #[test]
    fn test_first_add_creates_line() {
        let mut cart = CartLedger::new();
        let change = cart.add(&product("1", 89), Some("MEDIUM"), Some("Red"));

        assert_eq!(change, CartChange::Added { key: key("1-MEDIUM-Red") });
        let item = cart.items().first().unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.selected_size.as_deref(), Some("MEDIUM"));
        assert_eq!(item.selected_color.as_deref(), Some("Red"));
        assert_eq!(item.name, "Product 1");
    }

    #[test]
    fn test_repeat_add_increments() {
        let mut cart = CartLedger::new();
        let shirt = product("1", 89);

        cart.add(&shirt, Some("MEDIUM"), Some("Red"));
        let second = cart.add(&shirt, Some("MEDIUM"), Some("Red"));
        assert_eq!(
            second,
            CartChange::Incremented {
                key: key("1-MEDIUM-Red"),
                quantity: 2
            }
        );
        cart.add(&shirt, Some("MEDIUM"), Some("Red"));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&key("1-MEDIUM-Red")).unwrap().quantity, 3);
    }

    #[test]
    fn test_variants_are_distinct_lines() {
        let mut cart = CartLedger::new();
        let shirt = product("1", 89);

        cart.add(&shirt, Some("MEDIUM"), Some("Red"));
        cart.add(&shirt, Some("LARGE"), Some("Red"));

        assert_eq!(cart.len(), 2);
        assert!(cart.items().iter().all(|item| item.quantity == 1));
    }

    #[test]
    fn test_uniqueness_over_mixed_adds() {
        let mut cart = CartLedger::new();
        let a = product("a", 10);
        let b = product("b", 20);
        let selections = [
            (&a, Some("S"), Some("Red")),
            (&b, None, None),
            (&a, Some("S"), Some("Red")),
            (&a, Some("S"), None),
            (&b, None, None),
            (&a, None, Some("Red")),
            (&a, Some("S"), Some("Red")),
        ];
        for (p, size, color) in selections {
            cart.add(p, size, color);
        }

        let mut keys: Vec<&str> = cart.items().iter().map(|i| i.variant_key.as_str()).collect();
        assert_eq!(keys, vec!["a-S-Red", "b", "a-S", "a-Red"]);
        keys.dedup();
        assert_eq!(keys.len(), cart.len());
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = CartLedger::new();
        cart.add(&product("1", 89), Some("MEDIUM"), None);
        cart.add(&product("2", 65), None, None);

        let change = cart.update_quantity(&key("1-MEDIUM"), 0);
        assert_eq!(change, CartChange::Removed { key: key("1-MEDIUM") });
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_update_negative_removes() {
        let mut cart = CartLedger::new();
        cart.add(&product("1", 89), None, None);
        cart.update_quantity(&key("1"), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_sets_absolute_quantity() {
        let mut cart = CartLedger::new();
        let shirt = product("1", 89);
        cart.add(&shirt, None, None);
        cart.add(&shirt, None, None);

        let change = cart.update_quantity(&key("1"), 5);
        assert_eq!(
            change,
            CartChange::QuantitySet {
                key: key("1"),
                quantity: 5
            }
        );
        assert_eq!(cart.get(&key("1")).unwrap().quantity, 5);
    }

    #[test]
    fn test_subtotal_and_item_count() {
        let mut cart = CartLedger::new();
        let tee = product("4", 45);
        cart.add(&tee, Some("SMALL"), None);
        cart.add(&tee, Some("SMALL"), None);
        cart.add(&product("1", 89), None, None);

        assert_eq!(cart.subtotal(), Decimal::from(179));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut cart = CartLedger::new();
        cart.add(&product("1", 89), Some("MEDIUM"), None);
        let before = cart.items().to_vec();

        assert_eq!(cart.remove_item(&key("nonexistent")), CartChange::Unchanged);
        assert_eq!(cart.update_quantity(&key("nonexistent"), 5), CartChange::Unchanged);
        assert_eq!(cart.update_quantity(&key("nonexistent"), 0), CartChange::Unchanged);
        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_lines_keep_price_snapshot() {
        let mut cart = CartLedger::new();
        let mut shirt = product("1", 89);
        cart.add(&shirt, None, None);

        shirt.price = Decimal::from(120);
        cart.add(&shirt, None, None);

        let item = cart.get(&key("1")).unwrap();
        assert_eq!(item.price, Decimal::from(89));
        assert_eq!(cart.subtotal(), Decimal::from(178));
    }

    #[test]
    fn test_empty_strings_not_recorded_as_selection() {
        let mut cart = CartLedger::new();
        cart.add(&product("1", 89), Some(""), Some(""));
        let item = cart.get(&key("1")).unwrap();
        assert_eq!(item.selected_size, None);
        assert_eq!(item.selected_color, None);
        assert_eq!(item.variant_label(), None);
    }

    #[test]
    fn test_variant_label() {
        let mut cart = CartLedger::new();
        cart.add(&product("1", 89), Some("LARGE"), Some("Forest Green"));
        cart.add(&product("2", 65), Some("30"), None);

        let labels: Vec<Option<String>> = cart.items().iter().map(LineItem::variant_label).collect();
        assert_eq!(
            labels,
            vec![Some("LARGE / Forest Green".to_string()), Some("30".to_string())]
        );
    }

    #[test]
    fn test_subscribers_see_changes_but_not_noops() {
        let mut cart = CartLedger::new();
        let mut rx = cart.subscribe();
        let shirt = product("1", 89);

        cart.add(&shirt, None, None);
        cart.add(&shirt, None, None);
        cart.remove_item(&key("missing"));
        cart.update_quantity(&key("1"), 0);

        assert_eq!(rx.try_recv().unwrap(), CartChange::Added { key: key("1") });
        assert_eq!(
            rx.try_recv().unwrap(),
            CartChange::Incremented {
                key: key("1"),
                quantity: 2
            }
        );
        assert_eq!(rx.try_recv().unwrap(), CartChange::Removed { key: key("1") });
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_clear() {
        let mut cart = CartLedger::new();
        assert_eq!(cart.clear(), CartChange::Unchanged);
        cart.add(&product("1", 89), None, None);
        assert_eq!(cart.clear(), CartChange::Cleared);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_huge_quantity_saturates() {
        let mut cart = CartLedger::new();
        cart.add(&product("1", 1), None, None);
        cart.update_quantity(&key("1"), i64::MAX);
        assert_eq!(cart.get(&key("1")).unwrap().quantity, u32::MAX);
        cart.add(&product("1", 1), None, None);
        assert_eq!(cart.get(&key("1")).unwrap().quantity, u32::MAX);
    }
}
