use super::util::get_json;
use crate::core::{Balance, BalanceAdapter, PriceProvider};
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

const SUN_PER_TRX: f64 = 1_000_000.0;

#[derive(Debug, Deserialize)]
struct TronAccountResponse {
    #[serde(default)]
    balance: u64,
}

pub struct TronBalanceAdapter {
    base_url: String,
    client: reqwest::Client,
}

impl TronBalanceAdapter {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        TronBalanceAdapter {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl BalanceAdapter for TronBalanceAdapter {
    #[instrument(name = "TronBalanceFetch", skip(self, prices), fields(address = %address))]
    async fn fetch_balance(&self, address: &str, prices: &dyn PriceProvider) -> Result<Balance> {
        let url = format!("{}/api/account?address={}", self.base_url, address);
        debug!("Requesting TRON account from {}", url);

        let data: TronAccountResponse =
            get_json(|| self.client.get(&url), &format!("TRX balance of {address}")).await?;

        let native_amount = data.balance as f64 / SUN_PER_TRX;
        let price = prices.fetch_usd_price("TRX").await?;
        Ok(Balance::priced(native_amount, price, "TRX"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::util::http_client;
    use anyhow::anyhow;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedPrice(Option<f64>);

    #[async_trait]
    impl PriceProvider for FixedPrice {
        async fn fetch_usd_price(&self, symbol: &str) -> Result<f64> {
            self.0.ok_or_else(|| anyhow!("No price for {symbol}"))
        }
    }

    async fn create_mock_server(address: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/account"))
            .and(query_param("address", address))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn adapter(server: &MockServer) -> TronBalanceAdapter {
        TronBalanceAdapter::new(&server.uri(), http_client(Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_successful_balance_fetch() {
        let server = create_mock_server("TXyz", 200, r#"{"balance": 12500000, "address": "TXyz"}"#).await;

        let balance = adapter(&server)
            .fetch_balance("TXyz", &FixedPrice(Some(0.2)))
            .await
            .unwrap();

        assert_eq!(balance.native_amount, 12.5);
        assert_eq!(balance.usd_value, 2.5);
        assert_eq!(balance.token_symbol, "TRX");
    }

    #[tokio::test]
    async fn test_missing_balance_field_is_zero() {
        let server = create_mock_server("TEmpty", 200, "{}").await;

        let balance = adapter(&server)
            .fetch_balance("TEmpty", &FixedPrice(Some(0.2)))
            .await
            .unwrap();

        assert_eq!(balance.native_amount, 0.0);
        assert_eq!(balance.token_symbol, "TRX");
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let server = create_mock_server("TXyz", 503, "").await;

        let result = adapter(&server)
            .fetch_balance("TXyz", &FixedPrice(Some(0.2)))
            .await;

        assert!(result.unwrap_err().to_string().contains("HTTP error: 503"));
    }

    #[tokio::test]
    async fn test_price_failure_is_failure() {
        let server = create_mock_server("TXyz", 200, r#"{"balance": 1000000}"#).await;

        let result = adapter(&server).fetch_balance("TXyz", &FixedPrice(None)).await;

        assert!(result.is_err());
    }
}
