//! Wishlist ledger.
//!
//! Unlike the cart, the wishlist has no variant dimension and no quantities:
//! it is a set of products keyed by bare [`ProductId`], kept in the order
//! they were saved.

use serde::Serialize;
use tokio::sync::broadcast;

use notori_core::ProductId;

use crate::catalog::Product;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// What a wishlist mutation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WishlistChange {
    Saved { id: ProductId },
    Removed { id: ProductId },
    Unchanged,
}

/// Products the shopper has saved for later.
#[derive(Debug)]
pub struct Wishlist {
    items: Vec<Product>,
    changes: broadcast::Sender<WishlistChange>,
}

impl Default for Wishlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Wishlist {
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
    pub fn subscribe(&self) -> broadcast::Receiver<WishlistChange> {
        self.changes.subscribe()
    }

    /// Save `product`. Saving it again does nothing.
    pub fn add(&mut self, product: &Product) -> WishlistChange {
        if self.contains(&product.id) {
            return WishlistChange::Unchanged;
        }
        self.items.push(product.clone());
        self.publish(WishlistChange::Saved {
            id: product.id.clone(),
        })
    }

    /// Drop the product with `id`, if saved.
    pub fn remove(&mut self, id: &ProductId) -> WishlistChange {
        let before = self.items.len();
        self.items.retain(|p| &p.id != id);
        if self.items.len() == before {
            return WishlistChange::Unchanged;
        }
        self.publish(WishlistChange::Removed { id: id.clone() })
    }

    /// Save `product` if absent, otherwise remove it.
    ///
    /// Returns whether the product is saved afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            self.remove(&product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == id)
    }

    /// Saved products in the order they were saved.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn publish(&self, change: WishlistChange) -> WishlistChange {
        tracing::debug!(?change, "Wishlist change");
        // Err only means nobody is subscribed.
        let _ = self.changes.send(change.clone());
        change
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use notori_core::ProductCategory;

    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::from(40),
            image: String::new(),
            category: ProductCategory::Accessory,
            sold_out: false,
        }
    }

    #[test]
    fn test_toggle_flips() {
        let mut wishlist = Wishlist::new();
        let belt = product("7");

        assert!(wishlist.toggle(&belt));
        assert!(wishlist.contains(&belt.id));
        assert!(!wishlist.toggle(&belt));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = Wishlist::new();
        let hat = product("14");

        assert_eq!(
            wishlist.add(&hat),
            WishlistChange::Saved {
                id: ProductId::new("14")
            }
        );
        assert_eq!(wishlist.add(&hat), WishlistChange::Unchanged);
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_identity_ignores_variants() {
        // Wishlist identity is the product id alone, so the same product is
        // one entry no matter how it was reached.
        let mut wishlist = Wishlist::new();
        let mut renamed = product("7");
        wishlist.add(&product("7"));
        renamed.name = "Renamed".to_string();
        assert_eq!(wishlist.add(&renamed), WishlistChange::Unchanged);
        assert_eq!(wishlist.items().first().unwrap().name, "Product 7");
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut wishlist = Wishlist::new();
        wishlist.add(&product("1"));
        assert_eq!(
            wishlist.remove(&ProductId::new("2")),
            WishlistChange::Unchanged
        );
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_preserves_save_order() {
        let mut wishlist = Wishlist::new();
        for id in ["5", "2", "9"] {
            wishlist.add(&product(id));
        }
        wishlist.remove(&ProductId::new("2"));
        let ids: Vec<&str> = wishlist.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "9"]);
    }

    #[test]
    fn test_subscribers_notified() {
        let mut wishlist = Wishlist::new();
        let mut rx = wishlist.subscribe();
        let belt = product("7");

        wishlist.toggle(&belt);
        wishlist.toggle(&belt);

        assert!(matches!(rx.try_recv().unwrap(), WishlistChange::Saved { .. }));
        assert!(matches!(rx.try_recv().unwrap(), WishlistChange::Removed { .. }));
        assert!(rx.try_recv().is_err());
    }
}
