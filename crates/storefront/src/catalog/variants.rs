//! Size and color options per category.
//!
//! Availability is mocked: one size/color combination per category is marked
//! as sold out so the product page has something to grey out.

use notori_core::ProductCategory;

/// Colors offered for every product, default first.
pub const COLORS: &[&str] = &["Regent St Blue", "Forest Green", "Burgundy Red"];

const TOP_SIZES: &[&str] = &["SMALL", "MEDIUM", "LARGE"];
const WAIST_SIZES: &[&str] = &["28", "30", "32", "34", "36"];

/// The selectable variants for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantOptions {
    category: ProductCategory,
    /// Sizes in display order.
    pub sizes: &'static [&'static str],
    /// Colors in display order.
    pub colors: &'static [&'static str],
    /// Size preselected on the product page.
    pub default_size: &'static str,
    /// Color preselected on the product page.
    pub default_color: &'static str,
}

impl VariantOptions {
    #[must_use]
    pub const fn for_category(category: ProductCategory) -> Self {
        let (sizes, default_size) = match category {
            ProductCategory::Top => (TOP_SIZES, "MEDIUM"),
            ProductCategory::Bottom | ProductCategory::Accessory => (WAIST_SIZES, "30"),
        };
        Self {
            category,
            sizes,
            colors: COLORS,
            default_size,
            default_color: "Regent St Blue",
        }
    }

    /// Whether `size` and `color` are offered and in stock together.
    #[must_use]
    pub fn is_available(&self, size: &str, color: &str) -> bool {
        if !self.sizes.contains(&size) || !self.colors.contains(&color) {
            return false;
        }
        match self.category {
            ProductCategory::Top => !(size == "MEDIUM" && color == "Forest Green"),
            ProductCategory::Bottom | ProductCategory::Accessory => {
                !(size == "32" && color == "Burgundy Red")
            }
        }
    }
}
