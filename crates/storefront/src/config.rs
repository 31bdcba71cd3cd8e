//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `NOTORI_CURRENCY` - Currency selected at session start (default: USD)
//! - `NOTORI_AUTH_DELAY_MS` - Simulated sign-in latency (default: 1000)
//! - `NOTORI_PAYMENT_DELAY_MS` - Simulated payment latency (default: 2000)
//! - `NOTORI_CATALOG_PATH` - JSON file replacing the embedded catalog
//! - `NOTORI_STORE_URL` - Public store URL used in share links
//!   (default: <https://notori.y2.com>)
//! - `NOTORI_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use notori_core::CurrencyCode;

const DEFAULT_AUTH_DELAY_MS: &str = "1000";
const DEFAULT_PAYMENT_DELAY_MS: &str = "2000";
const DEFAULT_STORE_URL: &str = "https://notori.y2.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Currency selected when a session starts
    pub currency: CurrencyCode,
    /// Delay before a mock sign-in completes
    pub auth_delay: Duration,
    /// Delay before a mock payment completes
    pub payment_delay: Duration,
    /// Catalog file overriding the embedded seed catalog
    pub catalog_path: Option<PathBuf>,
    /// Public URL of the store
    pub store_url: Url,
    /// Log output format
    pub log_format: LogFormat,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Lookup(lookup);

        let currency = env
            .or_default("NOTORI_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| invalid("NOTORI_CURRENCY", &e))?;
        let auth_delay = env.millis("NOTORI_AUTH_DELAY_MS", DEFAULT_AUTH_DELAY_MS)?;
        let payment_delay = env.millis("NOTORI_PAYMENT_DELAY_MS", DEFAULT_PAYMENT_DELAY_MS)?;
        let catalog_path = env.optional("NOTORI_CATALOG_PATH").map(PathBuf::from);
        let store_url = Url::parse(&env.or_default("NOTORI_STORE_URL", DEFAULT_STORE_URL))
            .map_err(|e| invalid("NOTORI_STORE_URL", &e))?;
        let log_format = match env.or_default("NOTORI_LOG_FORMAT", "pretty").as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "NOTORI_LOG_FORMAT".to_string(),
                    format!("expected 'pretty' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            currency,
            auth_delay,
            payment_delay,
            catalog_path,
            store_url,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    /// Get an optional variable; empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a millisecond duration.
    fn millis(&self, key: &str, default: &str) -> Result<Duration, ConfigError> {
        self.or_default(key, default)
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| invalid(key, &e))
    }
}

fn invalid(key: &str, err: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}
