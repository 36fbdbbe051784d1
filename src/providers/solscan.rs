use super::util::get_json;
use crate::core::{Balance, BalanceAdapter, PriceProvider};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

const LAMPORTS_PER_SOL: f64 = 1e9;

#[derive(Debug, Deserialize)]
struct SolanaAccountResponse {
    #[serde(default)]
    lamports: u64,
}

pub struct SolanaBalanceAdapter {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl SolanaBalanceAdapter {
    pub fn new(base_url: &str, api_key: Option<String>, client: reqwest::Client) -> Self {
        SolanaBalanceAdapter {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }
}

#[async_trait]
impl BalanceAdapter for SolanaBalanceAdapter {
    #[instrument(name = "SolanaBalanceFetch", skip(self, prices), fields(address = %address))]
    async fn fetch_balance(&self, address: &str, prices: &dyn PriceProvider) -> Result<Balance> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("Solscan API key is not configured"))?;

        let url = format!("{}/account/{}", self.base_url, address);
        debug!("Requesting Solana account from {}", url);

        let data: SolanaAccountResponse = get_json(
            || self.client.get(&url).header("token", api_key),
            &format!("SOL balance of {address}"),
        )
        .await?;

        let native_amount = data.lamports as f64 / LAMPORTS_PER_SOL;
        let price = prices.fetch_usd_price("SOL").await?;
        Ok(Balance::priced(native_amount, price, "SOL"))
    }
}
