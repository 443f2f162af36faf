//! # Application Configuration
//!
//! Configuration loaded from environment variables (and a `.env` file when
//! present). All values are validated on startup to fail fast if misconfigured.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite:data/wallet.db` |
//! | `BIRDEYE_API_KEY` | unset (price proxy answers 500) |
//! | `BIRDEYE_API_BASE` | `https://public-api.birdeye.so` |
//! | `COINGECKO_API_BASE` | `https://api.coingecko.com/api/v3` |
//! | `SIMULATED_DELAY_MS` | `1500` |
//! | `DAPP_DELAY_MS` | `1000` |
//!
//! ```rust,no_run
//! use lib_core::config::Config;
//!
//! let config = Config::load()?;
//! println!("Storing wallet state in {}", config.database_url);
//! # Ok::<(), String>(())
//! ```

use lib_utils::envs::{get_env_opt, get_env_or, get_env_parse_or};
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/wallet.db";
pub const DEFAULT_BIRDEYE_API_BASE: &str = "https://public-api.birdeye.so";
pub const DEFAULT_COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 1500;
pub const DEFAULT_DAPP_DELAY_MS: u64 = 1000;

/// Upper bound for the simulated latencies.
const MAX_DELAY_MS: u64 = 60_000;

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// SQLite connection URL for the key-value store holding the wallet record.
    pub database_url: String,

    /// Birdeye API key, injected at deploy time and never checked in.
    pub birdeye_api_key: Option<String>,

    pub birdeye_api_base: String,

    pub coingecko_api_base: String,

    /// Latency simulated by create/import/send.
    pub simulated_delay_ms: u64,

    /// Latency simulated by the DApp directory fetch.
    pub dapp_delay_ms: u64,
}

impl Config {
    /// Load `.env` (if any), then read the environment.
    pub fn load() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let simulated_delay_ms = get_env_parse_or("SIMULATED_DELAY_MS", DEFAULT_SIMULATED_DELAY_MS)
            .map_err(|e| e.to_string())?;
        let dapp_delay_ms =
            get_env_parse_or("DAPP_DELAY_MS", DEFAULT_DAPP_DELAY_MS).map_err(|e| e.to_string())?;

        Ok(Self {
            database_url: get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            birdeye_api_key: get_env_opt("BIRDEYE_API_KEY"),
            birdeye_api_base: get_env_or("BIRDEYE_API_BASE", DEFAULT_BIRDEYE_API_BASE),
            coingecko_api_base: get_env_or("COINGECKO_API_BASE", DEFAULT_COINGECKO_API_BASE),
            simulated_delay_ms,
            dapp_delay_ms,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !self.database_url.starts_with("sqlite:") {
            return Err("DATABASE_URL must be a sqlite: URL".to_string());
        }

        for (name, url) in [
            ("BIRDEYE_API_BASE", &self.birdeye_api_base),
            ("COINGECKO_API_BASE", &self.coingecko_api_base),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("{} must be an http(s) URL", name));
            }
        }

        if self.simulated_delay_ms > MAX_DELAY_MS || self.dapp_delay_ms > MAX_DELAY_MS {
            return Err(format!("Simulated delays must not exceed {} ms", MAX_DELAY_MS));
        }

        Ok(())
    }

    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    pub fn dapp_delay(&self) -> Duration {
        Duration::from_millis(self.dapp_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            birdeye_api_key: None,
            birdeye_api_base: DEFAULT_BIRDEYE_API_BASE.to_string(),
            coingecko_api_base: DEFAULT_COINGECKO_API_BASE.to_string(),
            simulated_delay_ms: DEFAULT_SIMULATED_DELAY_MS,
            dapp_delay_ms: DEFAULT_DAPP_DELAY_MS,
        }
    }
}

// Keep the API key out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("birdeye_api_key", &self.birdeye_api_key.as_ref().map(|_| "***REDACTED***"))
            .field("birdeye_api_base", &self.birdeye_api_base)
            .field("coingecko_api_base", &self.coingecko_api_base)
            .field("simulated_delay_ms", &self.simulated_delay_ms)
            .field("dapp_delay_ms", &self.dapp_delay_ms)
            .finish()
    }
}
