use super::util::get_json;
use crate::core::{Balance, BalanceAdapter, PriceProvider};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

const WEI_PER_NATIVE: f64 = 1e18;

/// EVM networks served through Etherscan's multichain v2 API: (network id, chain id, symbol).
pub const EVM_CHAINS: &[(&str, u64, &str)] = &[
    ("ethereum", 1, "ETH"),
    ("bnb", 56, "BNB"),
    ("polygon", 137, "MATIC"),
    ("arbitrum", 42161, "ETH"),
    ("optimism", 10, "ETH"),
    ("base", 8453, "ETH"),
];

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: String,
}

pub struct EvmBalanceAdapter {
    base_url: String,
    api_key: Option<String>,
    chain_id: u64,
    symbol: String,
    client: reqwest::Client,
}

impl EvmBalanceAdapter {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        chain_id: u64,
        symbol: &str,
        client: reqwest::Client,
    ) -> Self {
        EvmBalanceAdapter {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            chain_id,
            symbol: symbol.to_string(),
            client,
        }
    }
}

#[async_trait]
impl BalanceAdapter for EvmBalanceAdapter {
    #[instrument(
        name = "EvmBalanceFetch",
        skip(self, prices),
        fields(chain_id = self.chain_id, address = %address)
    )]
    async fn fetch_balance(&self, address: &str, prices: &dyn PriceProvider) -> Result<Balance> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("Etherscan API key is not configured"))?;

        let url = format!(
            "{}/v2/api?chainid={}&module=account&action=balance&address={}&tag=latest&apikey={}",
            self.base_url, self.chain_id, address, api_key
        );
        debug!(chain_id = self.chain_id, "Requesting EVM balance");

        let data: EtherscanResponse = get_json(
            || self.client.get(&url),
            &format!("{} balance of {address}", self.symbol),
        )
        .await?;

        if data.status != "1" {
            return Err(anyhow!(
                "Etherscan returned status {} ({}): {}",
                data.status,
                data.message,
                data.result
            ));
        }

        let wei: u128 = data
            .result
            .parse()
            .with_context(|| format!("Invalid wei balance: {}", data.result))?;
        let native_amount = wei as f64 / WEI_PER_NATIVE;
        let price = prices.fetch_usd_price(&self.symbol).await?;

        Ok(Balance::priced(native_amount, price, &self.symbol))
    }
}
