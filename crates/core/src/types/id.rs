//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe string ID wrappers that
//! prevent accidentally mixing identifiers from different entity types.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, `Display` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use notori_core::define_id;
/// define_id!(ProductId);
/// define_id!(UserId);
///
/// let product_id = ProductId::new("1");
/// let user_id = UserId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = user_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID, returning the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Whether the ID is the empty string.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(UserId);

/// Composite identity of a cart line: product plus chosen size and color.
///
/// The key is `product_id` alone when nothing was chosen, otherwise the
/// chosen parts are appended with `-` separators in size, color order:
/// `1-MEDIUM-Red`, `1-MEDIUM`, `1-Red`.
///
/// An empty selection string counts as "not chosen", so `Some("")` and `None`
/// produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantKey(String);

impl VariantKey {
    /// Derive the key for a product and optional size/color selection.
    ///
    /// ```rust
    /// # use notori_core::{ProductId, VariantKey};
    /// let id = ProductId::new("4");
    /// assert_eq!(VariantKey::derive(&id, Some("MEDIUM"), Some("Red")).as_str(), "4-MEDIUM-Red");
    /// assert_eq!(VariantKey::derive(&id, None, Some("Red")).as_str(), "4-Red");
    /// assert_eq!(VariantKey::derive(&id, None, None).as_str(), "4");
    /// ```
    #[must_use]
    pub fn derive(product_id: &ProductId, size: Option<&str>, color: Option<&str>) -> Self {
        let mut key = product_id.as_str().to_owned();
        for part in [size, color].into_iter().flatten() {
            if !part.is_empty() {
                key.push('-');
                key.push_str(part);
            }
        }
        Self(key)
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keys handed back by a view layer (e.g. typed into the shell) are taken
/// verbatim; they only ever match lines whose derived key is identical.
impl From<&str> for VariantKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for VariantKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl AsRef<str> for VariantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_all_forms() {
        let id = ProductId::new("12");
        assert_eq!(VariantKey::derive(&id, None, None).as_str(), "12");
        assert_eq!(
            VariantKey::derive(&id, Some("30"), Some("Burgundy Red")).as_str(),
            "12-30-Burgundy Red"
        );
        assert_eq!(VariantKey::derive(&id, Some("30"), None).as_str(), "12-30");
        assert_eq!(
            VariantKey::derive(&id, None, Some("Forest Green")).as_str(),
            "12-Forest Green"
        );
    }

    #[test]
    fn test_empty_selection_is_not_chosen() {
        let id = ProductId::new("3");
        assert_eq!(
            VariantKey::derive(&id, Some(""), Some("")),
            VariantKey::derive(&id, None, None)
        );
        assert_eq!(
            VariantKey::derive(&id, Some(""), Some("Red")),
            VariantKey::derive(&id, None, Some("Red"))
        );
    }

    #[test]
    fn test_key_from_view_matches_derived() {
        let id = ProductId::new("1");
        let derived = VariantKey::derive(&id, Some("LARGE"), Some("Regent St Blue"));
        assert_eq!(VariantKey::from("1-LARGE-Regent St Blue"), derived);
    }

    #[test]
    fn test_product_id_serde_transparent() {
        let id = ProductId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
        let parsed: ProductId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_distinct_id_types_display() {
        let product = ProductId::from("9");
        let user = UserId::from("9".to_string());
        assert_eq!(product.to_string(), user.to_string());
        assert!(!product.is_empty());
        assert!(ProductId::new("").is_empty());
    }
}
