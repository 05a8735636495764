//! Runtime configuration from `COINWATCH_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";
const DEFAULT_VS_CURRENCY: &str = "usd";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const STORE_FILE_NAME: &str = "store.json";
const LOG_FILE_NAME: &str = "coinwatch.log";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub vs_currency: String,
    pub data_dir: PathBuf,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            data_dir: default_data_dir(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("coinwatch")
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or blank values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();
        if let Some(url) = get("COINWATCH_API_URL") {
            cfg.api_url = url.trim().to_string();
        }
        if let Some(currency) = get("COINWATCH_VS_CURRENCY") {
            cfg.vs_currency = currency.trim().to_lowercase();
        }
        if let Some(dir) = get("COINWATCH_DATA_DIR") {
            cfg.data_dir = PathBuf::from(dir);
        }
        if let Some(secs) = get("COINWATCH_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("COINWATCH_TIMEOUT_SECS is not a number: {secs}"))?;
            cfg.timeout = Duration::from_secs(secs);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            bail!("api url must be http(s): {}", self.api_url);
        }
        if self.vs_currency.is_empty() || !self.vs_currency.chars().all(|c| c.is_ascii_alphanumeric()) {
            bail!("vs currency must be a non-empty alphanumeric code: {}", self.vs_currency);
        }
        let secs = self.timeout.as_secs();
        if !(1..=300).contains(&secs) {
            bail!("timeout out of range (1..=300 s): {secs}");
        }
        if self.data_dir.as_os_str().is_empty() {
            bail!("data dir is required");
        }
        Ok(())
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}
