use super::util::get_json;
use crate::core::PriceProvider;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, instrument};

const COIN_IDS: &[(&str, &str)] = &[
    ("ETH", "ethereum"),
    ("TRX", "tron"),
    ("SOL", "solana"),
    ("BNB", "binancecoin"),
    ("MATIC", "matic-network"),
    ("TON", "the-open-network"),
];

/// CoinGecko id for a ticker symbol; unknown symbols are lower-cased.
pub fn coin_id(symbol: &str) -> String {
    let upper = symbol.to_uppercase();
    COIN_IDS
        .iter()
        .find(|(known, _)| *known == upper)
        .map_or_else(|| symbol.to_lowercase(), |(_, id)| id.to_string())
}

/// `simple/price` response: coin id to currency to price.
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

pub struct CoinGeckoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        CoinGeckoProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoPriceFetch", skip(self), fields(symbol = %symbol))]
    async fn fetch_usd_price(&self, symbol: &str) -> Result<f64> {
        let id = coin_id(symbol);
        let url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies=usd",
            self.base_url, id
        );
        debug!("Requesting price data from {}", url);

        let data: SimplePriceResponse =
            get_json(|| self.client.get(&url), &format!("price of {symbol}")).await?;

        data.get(&id)
            .and_then(|prices| prices.get("usd"))
            .copied()
            .ok_or_else(|| anyhow!("No USD price found for symbol: {}", symbol))
    }
}
