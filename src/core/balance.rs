//! Balance lookups keyed by network identifier

use super::price::PriceProvider;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Native balance of one address with its USD value.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub native_amount: f64,
    pub usd_value: f64,
    pub token_symbol: String,
}

impl Balance {
    /// Placeholder used when a lookup fails.
    pub fn zero() -> Self {
        Self {
            native_amount: 0.0,
            usd_value: 0.0,
            token_symbol: "?".to_string(),
        }
    }

    pub fn priced(native_amount: f64, unit_price: f64, token_symbol: &str) -> Self {
        Self {
            native_amount,
            usd_value: native_amount * unit_price,
            token_symbol: token_symbol.to_string(),
        }
    }
}

/// Fetches the native balance for addresses on one network family.
#[async_trait]
pub trait BalanceAdapter: Send + Sync {
    async fn fetch_balance(&self, address: &str, prices: &dyn PriceProvider) -> Result<Balance>;
}

/// Network id to adapter table.
#[derive(Clone, Default)]
pub struct BalanceRegistry {
    adapters: HashMap<String, Arc<dyn BalanceAdapter>>,
}

impl BalanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, network: &str, adapter: Arc<dyn BalanceAdapter>) -> &mut Self {
        self.adapters.insert(network.to_string(), adapter);
        self
    }

    /// Exact network id first, then its family (`ethereum_sepolia` resolves via `ethereum`).
    pub fn resolve(&self, network: &str) -> Option<&Arc<dyn BalanceAdapter>> {
        self.adapters.get(network).or_else(|| {
            network
                .split_once('_')
                .and_then(|(family, _)| self.adapters.get(family))
        })
    }

    pub fn networks(&self) -> impl Iterator<Item = &str> {
        self.adapters.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for BalanceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut networks: Vec<&str> = self.networks().collect();
        networks.sort();
        f.debug_struct("BalanceRegistry")
            .field("networks", &networks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAdapter(&'static str);

    #[async_trait]
    impl BalanceAdapter for FixedAdapter {
        async fn fetch_balance(&self, _address: &str, _prices: &dyn PriceProvider) -> Result<Balance> {
            Ok(Balance::priced(1.0, 1.0, self.0))
        }
    }

    struct NoPrices;

    #[async_trait]
    impl PriceProvider for NoPrices {
        async fn fetch_usd_price(&self, symbol: &str) -> Result<f64> {
            Err(anyhow::anyhow!("no price for {symbol}"))
        }
    }

    #[tokio::test]
    async fn test_resolve_exact_then_family() {
        let mut registry = BalanceRegistry::new();
        registry
            .register("ethereum", Arc::new(FixedAdapter("ETH")))
            .register("tron", Arc::new(FixedAdapter("TRX")));

        let eth = registry.resolve("ethereum_sepolia").unwrap();
        let balance = eth.fetch_balance("0xabc", &NoPrices).await.unwrap();
        assert_eq!(balance.token_symbol, "ETH");

        let trx = registry.resolve("tron").unwrap();
        let balance = trx.fetch_balance("T123", &NoPrices).await.unwrap();
        assert_eq!(balance.token_symbol, "TRX");

        assert!(registry.resolve("solana").is_none());
        assert!(registry.resolve("sol_devnet").is_none());
    }

    #[test]
    fn test_priced_balance() {
        let balance = Balance::priced(2.5, 4.0, "SOL");
        assert_eq!(balance.usd_value, 10.0);
        assert_eq!(balance.token_symbol, "SOL");
        assert_eq!(Balance::zero().token_symbol, "?");
    }
}
