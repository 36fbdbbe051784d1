//! Pricing abstractions

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// USD price of one unit of `symbol`.
    async fn fetch_usd_price(&self, symbol: &str) -> Result<f64>;
}
