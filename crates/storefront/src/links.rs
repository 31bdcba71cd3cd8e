//! Outbound links: product share buttons and store help pages.

use serde::Serialize;
use url::Url;

use crate::catalog::Product;

/// Support mailbox shown on the checkout page.
pub const SUPPORT_EMAIL: &str = "support@notorious.y2.com";

/// Support phone line shown on the checkout page.
pub const SUPPORT_PHONE: &str = "+27 63 503 5882";

/// Help pages linked from the checkout footer, relative to the store URL.
pub const HELP_PAGES: &[(&str, &str)] = &[
    ("Shipping Info", "shipping"),
    ("Returns", "returns"),
    ("Size Guide", "size-guide"),
    ("FAQ", "faq"),
];

/// Networks a product can be shared to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareNetwork {
    Instagram,
    Facebook,
    Twitter,
    Pinterest,
}

impl ShareNetwork {
    pub const ALL: [Self; 4] = [Self::Instagram, Self::Facebook, Self::Twitter, Self::Pinterest];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::Twitter => "Twitter",
            Self::Pinterest => "Pinterest",
        }
    }
}

/// Builds absolute links rooted at the public store URL.
#[derive(Debug, Clone)]
pub struct Links {
    store_url: Url,
}

impl Links {
    #[must_use]
    pub const fn new(store_url: Url) -> Self {
        Self { store_url }
    }

    /// Public page of a product, `<store>/products/<id>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store URL cannot be a base (e.g. `mailto:`).
    pub fn product_url(&self, product: &Product) -> Result<Url, url::ParseError> {
        let mut url = self.store_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["products", product.id.as_str()]);
        Ok(url)
    }

    /// Share link for `product` on `network`; query values are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the product URL cannot be built.
    pub fn share_url(&self, product: &Product, network: ShareNetwork) -> Result<Url, url::ParseError> {
        let page = self.product_url(product)?;
        let blurb = format!("Check out this {}", product.name);

        let url = match network {
            ShareNetwork::Instagram => {
                Url::parse_with_params("https://instagram.com/share", [("url", page.as_str())])?
            }
            ShareNetwork::Facebook => Url::parse_with_params(
                "https://facebook.com/sharer/sharer.php",
                [("u", page.as_str())],
            )?,
            ShareNetwork::Twitter => Url::parse_with_params(
                "https://twitter.com/intent/tweet",
                [("url", page.as_str()), ("text", blurb.as_str())],
            )?,
            ShareNetwork::Pinterest => Url::parse_with_params(
                "https://pinterest.com/pin/create/button/",
                [("url", page.as_str()), ("description", blurb.as_str())],
            )?,
        };
        Ok(url)
    }

    /// Absolute URLs for [`HELP_PAGES`], in footer order.
    ///
    /// # Errors
    ///
    /// Returns an error if a page path cannot be joined onto the store URL.
    pub fn help_pages(&self) -> Result<Vec<(&'static str, Url)>, url::ParseError> {
        HELP_PAGES
            .iter()
            .map(|(label, path)| Ok((*label, self.store_url.join(path)?)))
            .collect()
    }

    /// `mailto:` link for the support mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error if [`SUPPORT_EMAIL`] is not a valid address.
    pub fn support_email() -> Result<Url, url::ParseError> {
        Url::parse(&format!("mailto:{SUPPORT_EMAIL}"))
    }
}
