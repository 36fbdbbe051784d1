pub mod coingecko;
pub mod etherscan;
pub mod solscan;
pub mod tronscan;
pub mod util;

use crate::core::BalanceRegistry;
use crate::core::config::ProvidersConfig;
use etherscan::{EVM_CHAINS, EvmBalanceAdapter};
use solscan::SolanaBalanceAdapter;
use std::sync::Arc;
use tronscan::TronBalanceAdapter;

/// Registers an adapter for every supported network.
pub fn build_registry(providers: &ProvidersConfig, client: &reqwest::Client) -> BalanceRegistry {
    let mut registry = BalanceRegistry::new();

    for (network, chain_id, symbol) in EVM_CHAINS {
        registry.register(
            network,
            Arc::new(EvmBalanceAdapter::new(
                &providers.etherscan.base_url,
                providers.etherscan.api_key.clone(),
                *chain_id,
                symbol,
                client.clone(),
            )),
        );
    }

    registry
        .register(
            "tron",
            Arc::new(TronBalanceAdapter::new(
                &providers.tronscan.base_url,
                client.clone(),
            )),
        )
        .register(
            "solana",
            Arc::new(SolanaBalanceAdapter::new(
                &providers.solscan.base_url,
                providers.solscan.api_key.clone(),
                client.clone(),
            )),
        );

    registry
}
