//! Read-only catalog commands.
//!
//! # Usage
//!
//! ```bash
//! notori catalog --category bottom
//! notori product 14 --currency ZAR
//! notori currencies
//! ```

use std::io::{self, Write};

use notori_core::{ProductCategory, ProductId};
use notori_storefront::catalog::Product;
use notori_storefront::links::ShareNetwork;
use notori_storefront::pricing::CurrencySelector;
use notori_storefront::{Session, StoreError};

use super::CommandError;

/// List products, optionally limited to one category.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn catalog(
    session: &Session,
    category: Option<ProductCategory>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let products: Vec<&Product> = match category {
        Some(category) => session.catalog().by_category(category).collect(),
        None => session.catalog().products().iter().collect(),
    };

    for product in &products {
        write_product_row(session, product, out)?;
    }
    writeln!(out, "{} products", products.len())?;
    Ok(())
}

/// Show one product with its variants, recommendations and share links.
///
/// # Errors
///
/// Returns `StoreError::ProductNotFound` for unknown ids, or an error if
/// writing to `out` fails.
pub fn product(session: &Session, id: &ProductId, out: &mut impl Write) -> Result<(), CommandError> {
    let product = session.product(id)?;
    let options = product.variant_options();

    writeln!(out, "{}", product.name)?;
    writeln!(
        out,
        "  {} · {}{}",
        session.format_price(product.price),
        product.category,
        if product.sold_out { " · SOLD OUT" } else { "" }
    )?;
    writeln!(
        out,
        "  Sizes:  {} (default {})",
        options.sizes.join(", "),
        options.default_size
    )?;
    writeln!(
        out,
        "  Colors: {} (default {})",
        options.colors.join(", "),
        options.default_color
    )?;

    if !product.sold_out {
        let unavailable: Vec<String> = options
            .sizes
            .iter()
            .flat_map(|size| options.colors.iter().map(move |color| (*size, *color)))
            .filter(|(size, color)| !product.is_variant_available(size, color))
            .map(|(size, color)| format!("{size} / {color}"))
            .collect();
        if !unavailable.is_empty() {
            writeln!(out, "  Unavailable: {}", unavailable.join(", "))?;
        }
    }

    let links = session.links();
    writeln!(
        out,
        "  Link:   {}",
        links.product_url(product).map_err(StoreError::from)?
    )?;
    for network in ShareNetwork::ALL {
        let url = links.share_url(product, network).map_err(StoreError::from)?;
        writeln!(out, "  {:<10}{url}", network.label())?;
    }

    write_section(session, "Style it with", &session.catalog().style_with(id), out)?;
    write_section(session, "You may also like", &session.catalog().you_may_like(id), out)?;
    Ok(())
}

/// List supported display currencies, marking the selected one.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn currencies(session: &Session, out: &mut impl Write) -> Result<(), CommandError> {
    let selected = session.currency().selected().code;
    for currency in CurrencySelector::currencies() {
        let marker = if currency.code == selected { '*' } else { ' ' };
        writeln!(
            out,
            "{marker} {} {:<3} {}",
            currency.code.code(),
            currency.symbol,
            currency.rate
        )?;
    }
    Ok(())
}

/// One catalog line: id, name, category, price in the selected currency.
pub(crate) fn write_product_row(
    session: &Session,
    product: &Product,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(
        out,
        "{:>3}  {:<32} {:<9} {:>10}{}",
        product.id.as_str(),
        product.name,
        product.category.to_string(),
        session.format_price(product.price),
        if product.sold_out { "  SOLD OUT" } else { "" }
    )
}

fn write_section(
    session: &Session,
    title: &str,
    products: &[&Product],
    out: &mut impl Write,
) -> io::Result<()> {
    if products.is_empty() {
        return Ok(());
    }
    writeln!(out, "{title}:")?;
    for product in products {
        write_product_row(session, product, out)?;
    }
    Ok(())
}
