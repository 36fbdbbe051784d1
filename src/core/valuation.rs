//! Per-wallet balance lookups aggregated into a group summary

use super::balance::{Balance, BalanceRegistry};
use super::price::PriceProvider;
use super::wallet::WalletRecord;
use futures::{StreamExt, stream};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

const NETWORK_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("ethereum", "Ethereum"),
    ("polygon", "Polygon"),
    ("arbitrum", "Arbitrum"),
    ("tron", "TRON"),
    ("solana", "Solana"),
    ("ton", "TON"),
    ("bnb", "BNB Chain"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub network_display: String,
    pub native_amount: f64,
    pub token_symbol: String,
    pub usd_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletDetail {
    pub label: String,
    pub address: String,
    pub holding: Holding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub group_name: String,
    pub total_usd: f64,
    pub holdings: Vec<Holding>,
    pub details: Vec<WalletDetail>,
}

/// Display name for a network id: configured override, built-in table, then title case.
pub fn network_display(network: &str, overrides: &HashMap<String, String>) -> String {
    if let Some(name) = overrides.get(network) {
        return name.clone();
    }
    NETWORK_DISPLAY_NAMES
        .iter()
        .find(|(id, _)| *id == network)
        .map_or_else(|| title_case(network), |(_, name)| name.to_string())
}

fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word_start = true;
    for c in raw.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

/// Values wallets through the balance registry. Holds no state between requests.
#[derive(Clone)]
pub struct Valuator {
    registry: Arc<BalanceRegistry>,
    prices: Arc<dyn PriceProvider>,
    timeout: Duration,
    max_concurrent: usize,
    network_names: HashMap<String, String>,
}

impl Valuator {
    pub fn new(registry: Arc<BalanceRegistry>, prices: Arc<dyn PriceProvider>) -> Self {
        Self {
            registry,
            prices,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT_LOOKUPS,
            network_names: HashMap::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps in-flight lookups per aggregation; zero is treated as one.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn with_network_names(mut self, network_names: HashMap<String, String>) -> Self {
        self.network_names = network_names;
        self
    }

    /// Looks up wallets with bounded concurrency, keeping input order; failures become zero holdings.
    #[instrument(name = "AggregateGroup", skip(self, records), fields(wallets = records.len()))]
    pub async fn aggregate(&self, group_name: &str, records: &[WalletRecord]) -> GroupSummary {
        let balances: Vec<Balance> = stream::iter(records)
            .map(|record| self.lookup(record))
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut total_usd = 0.0;
        let mut holdings = Vec::with_capacity(records.len());
        let mut details = Vec::with_capacity(records.len());

        for (record, balance) in records.iter().zip(balances) {
            total_usd += balance.usd_value;
            let holding = Holding {
                network_display: network_display(&record.network, &self.network_names),
                native_amount: balance.native_amount,
                token_symbol: balance.token_symbol,
                usd_value: balance.usd_value,
            };
            details.push(WalletDetail {
                label: record.label.clone(),
                address: record.address.clone(),
                holding: holding.clone(),
            });
            holdings.push(holding);
        }

        debug!(total_usd, "Aggregated group");
        GroupSummary {
            group_name: group_name.to_string(),
            total_usd,
            holdings,
            details,
        }
    }

    async fn lookup(&self, record: &WalletRecord) -> Balance {
        let Some(adapter) = self.registry.resolve(&record.network) else {
            warn!(
                network = %record.network,
                address = %record.address,
                "No balance adapter for network"
            );
            return Balance::zero();
        };

        let fetch = adapter.fetch_balance(&record.address, self.prices.as_ref());
        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(Ok(balance)) => balance,
            Ok(Err(e)) => {
                warn!(
                    network = %record.network,
                    address = %record.address,
                    error = %e,
                    "Balance lookup failed"
                );
                Balance::zero()
            }
            Err(_) => {
                warn!(
                    network = %record.network,
                    address = %record.address,
                    timeout = ?self.timeout,
                    "Balance lookup timed out"
                );
                Balance::zero()
            }
        }
    }
}
