//! Notori CLI - the Notori Y2 storefront in a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog in euros
//! notori catalog --category top --currency EUR
//!
//! # Product details, variants and recommendations
//! notori product 4
//!
//! # Supported currencies and rates
//! notori currencies
//!
//! # Interactive shopping session (type `help` inside)
//! notori shop
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products
//! - `product` - Show one product
//! - `currencies` - List display currencies
//! - `shop` - Cart, wishlist, sign-in and checkout over stdin

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use notori_core::{CurrencyCode, ProductCategory, ProductId};
use notori_storefront::{LogFormat, Session, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "notori")]
#[command(author, version, about = "Notori Y2 storefront in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Catalog {
        /// Only show one category (`top`, `bottom`, `accessory`)
        #[arg(short, long)]
        category: Option<ProductCategory>,

        /// Display currency (overrides `NOTORI_CURRENCY`)
        #[arg(long)]
        currency: Option<CurrencyCode>,
    },
    /// Show a product with its variants and recommendations
    Product {
        /// Product id
        id: String,

        /// Display currency (overrides `NOTORI_CURRENCY`)
        #[arg(long)]
        currency: Option<CurrencyCode>,
    },
    /// List supported display currencies
    Currencies,
    /// Start an interactive shopping session
    Shop,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();
    init_tracing(config.as_ref().map_or(LogFormat::default(), |c| c.log_format));

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter`; logs go to stderr so stdout stays
/// clean for command output.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "notori_storefront=info,notori_cli=info".into());

    // JSON for log shippers, plain text otherwise
    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(config)?;
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Catalog { category, currency } => {
            if let Some(code) = currency {
                session.select_currency(code);
            }
            commands::browse::catalog(&session, category, &mut stdout)?;
        }
        Commands::Product { id, currency } => {
            if let Some(code) = currency {
                session.select_currency(code);
            }
            commands::browse::product(&session, &ProductId::new(id), &mut stdout)?;
        }
        Commands::Currencies => commands::browse::currencies(&session, &mut stdout)?,
        Commands::Shop => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::shop::Shell::new(session, stdin, stdout).run().await?;
        }
    }
    Ok(())
}
