//! Product catalog.
//!
//! The catalog is a static, read-only list of products. The seeded catalog is
//! embedded in the binary from `catalog.json`; an alternative JSON file can be
//! supplied through configuration. Nothing in the storefront mutates a catalog
//! after it is loaded.

mod variants;

pub use variants::{COLORS, VariantOptions};

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use notori_core::{Price, ProductCategory, ProductId};

/// Seed catalog shipped with the storefront.
const SEED_CATALOG: &str = include_str!("catalog.json");

/// Number of "style it with" suggestions shown on a product page.
const STYLE_WITH_LIMIT: usize = 4;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("product at position {0} has an empty id")]
    EmptyId(usize),

    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique within the catalog.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the base currency.
    pub price: Decimal,
    /// Image path or URL.
    pub image: String,
    pub category: ProductCategory,
    #[serde(default)]
    pub sold_out: bool,
}

impl Product {
    /// Unit price as a base-currency [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::base(self.price)
    }

    /// Size and color options offered for this product.
    #[must_use]
    pub const fn variant_options(&self) -> VariantOptions {
        VariantOptions::for_category(self.category)
    }

    /// Whether a given size/color combination can be bought.
    ///
    /// Sold-out products have no available variants.
    #[must_use]
    pub fn is_variant_available(&self, size: &str, color: &str) -> bool {
        !self.sold_out && self.variant_options().is_available(size, color)
    }
}

/// The read-only product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load the embedded seed catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded JSON fails validation.
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::from_json(SEED_CATALOG)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or any error
    /// [`Catalog::from_json`] returns.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Loaded catalog file");
        Ok(catalog)
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or a validation error
    /// from [`Catalog::from_products`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Build a catalog from products, validating ids and prices.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty id, a duplicate id, or a negative price.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.id.is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in a category, in catalog order.
    pub fn by_category(&self, category: ProductCategory) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Products that are not sold out.
    pub fn available(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !p.sold_out)
    }

    /// Pieces from other categories to wear with `id`, at most four.
    #[must_use]
    pub fn style_with(&self, id: &ProductId) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| &p.id != id && p.category != product.category)
            .take(STYLE_WITH_LIMIT)
            .collect()
    }

    /// Every other product in the same category as `id`.
    #[must_use]
    pub fn you_may_like(&self, id: &ProductId) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| &p.id != id && p.category == product.category)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seeded() -> Catalog {
        Catalog::seeded().unwrap()
    }

    #[test]
    fn test_seed_catalog_loads() {
        let catalog = seeded();
        assert_eq!(catalog.len(), 18);

        let shirt = catalog.get(&ProductId::new("1")).unwrap();
        assert_eq!(shirt.name, "Red Plaid Shirt");
        assert_eq!(shirt.price, Decimal::from(89));
        assert_eq!(shirt.category, ProductCategory::Top);
        assert!(!shirt.sold_out);
    }

    #[test]
    fn test_seed_sold_out_flags() {
        let catalog = seeded();
        let sold_out: Vec<&str> = catalog
            .products()
            .iter()
            .filter(|p| p.sold_out)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(sold_out, vec!["3", "10"]);
        assert_eq!(catalog.available().count(), 16);
    }

    #[test]
    fn test_by_category() {
        let catalog = seeded();
        let accessories: Vec<&str> = catalog
            .by_category(ProductCategory::Accessory)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            accessories,
            vec!["Pink Studded Belt", "Green Studded Belt", "Cow Print Bucket Hat"]
        );
    }

    #[test]
    fn test_style_with_excludes_own_category() {
        let catalog = seeded();
        let picks = catalog.style_with(&ProductId::new("1"));
        assert_eq!(picks.len(), 4);
        assert!(picks.iter().all(|p| p.category != ProductCategory::Top));
        assert_eq!(picks.first().unwrap().id.as_str(), "2");
    }

    #[test]
    fn test_you_may_like_same_category() {
        let catalog = seeded();
        let picks = catalog.you_may_like(&ProductId::new("7"));
        let ids: Vec<&str> = picks.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["11", "14"]);
        assert!(catalog.you_may_like(&ProductId::new("missing")).is_empty());
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"[
            {"id": "a", "name": "A", "price": "1", "image": "a.jpg", "category": "top"},
            {"id": "a", "name": "B", "price": "2", "image": "b.jpg", "category": "top"}
        ]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id.as_str() == "a"));
    }

    #[test]
    fn test_from_json_rejects_empty_id_and_negative_price() {
        let json = r#"[{"id": "", "name": "A", "price": "1", "image": "a.jpg", "category": "top"}]"#;
        assert!(matches!(
            Catalog::from_json(json).unwrap_err(),
            CatalogError::EmptyId(0)
        ));

        let json = r#"[{"id": "x", "name": "A", "price": "-1", "image": "a.jpg", "category": "top"}]"#;
        assert!(matches!(
            Catalog::from_json(json).unwrap_err(),
            CatalogError::NegativePrice(_)
        ));
    }

    #[test]
    fn test_from_json_accepts_numeric_price_and_zero() {
        let json = r#"[{"id": "free", "name": "Sticker", "price": 0, "image": "s.jpg", "category": "accessory"}]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert!(catalog.get(&ProductId::new("free")).unwrap().price.is_zero());
    }

    #[test]
    fn test_from_json_rejects_unknown_category() {
        let json = r#"[{"id": "x", "name": "A", "price": "1", "image": "a.jpg", "category": "shoes"}]"#;
        assert!(matches!(
            Catalog::from_json(json).unwrap_err(),
            CatalogError::Parse(_)
        ));
    }
}
