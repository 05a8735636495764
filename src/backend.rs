//! HTTP client for a CoinGecko-compatible market API
//! (GET /coins/list, GET /coins/markets, GET /coins/{id}).

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{decode_entries, CatalogEntry};

/// One watchlist row's live data from GET /coins/markets.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MarketQuote {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub current_price: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub last_updated: Option<String>,
}

/// Expanded row data from GET /coins/{id}, in the configured quote currency.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoinDetails {
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub homepage: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDetails {
    #[serde(default)]
    market_data: Option<RawMarketData>,
    #[serde(default)]
    links: Option<RawLinks>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMarketData {
    #[serde(default)]
    market_cap: Value,
    #[serde(default)]
    total_volume: Value,
    #[serde(default)]
    high_24h: Value,
    #[serde(default)]
    low_24h: Value,
    price_change_percentage_24h: Option<f64>,
    circulating_supply: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLinks {
    #[serde(default)]
    homepage: Vec<String>,
}

impl RawDetails {
    fn into_details(self, vs_currency: &str) -> CoinDetails {
        let in_currency = |value: &Value| value.get(vs_currency).and_then(Value::as_f64);
        let homepage = self
            .links
            .and_then(|links| links.homepage.into_iter().find(|url| !url.trim().is_empty()));
        match self.market_data {
            Some(m) => CoinDetails {
                market_cap: in_currency(&m.market_cap),
                total_volume: in_currency(&m.total_volume),
                high_24h: in_currency(&m.high_24h),
                low_24h: in_currency(&m.low_24h),
                price_change_percentage_24h: m.price_change_percentage_24h,
                circulating_supply: m.circulating_supply,
                homepage,
            },
            None => CoinDetails { homepage, ..CoinDetails::default() },
        }
    }
}

/// The catalog and price/detail providers the app consumes.
pub trait MarketProvider: Send + Sync + 'static {
    fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, String>;
    fn fetch_quotes(&self, ids: &[String], vs_currency: &str) -> Result<Vec<MarketQuote>, String>;
    fn fetch_details(&self, id: &str, vs_currency: &str) -> Result<CoinDetails, String>;
}

pub struct BackendClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl BackendClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coinwatch-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client");
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, String> {
        let resp = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .map_err(|e| e.to_string())?;
        if !resp.status().is_success() {
            return Err(format!("HTTP {}: {}", resp.status(), resp.text().unwrap_or_default()));
        }
        resp.json().map_err(|e| e.to_string())
    }
}

impl MarketProvider for BackendClient {
    /// Full coin list. Malformed elements are dropped, not reported.
    fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, String> {
        let items: Vec<Value> = self.get_json("coins/list", &[])?;
        Ok(decode_entries(items))
    }

    fn fetch_quotes(&self, ids: &[String], vs_currency: &str) -> Result<Vec<MarketQuote>, String> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = ids.join(",");
        self.get_json("coins/markets", &[("vs_currency", vs_currency), ("ids", joined.as_str())])
    }

    fn fetch_details(&self, id: &str, vs_currency: &str) -> Result<CoinDetails, String> {
        let raw: RawDetails = self.get_json(
            &format!("coins/{id}"),
            &[
                ("localization", "false"),
                ("tickers", "false"),
                ("community_data", "false"),
                ("developer_data", "false"),
                ("sparkline", "false"),
            ],
        )?;
        Ok(raw.into_details(vs_currency))
    }
}
