//! Tracked wallet records and the read-only storage abstraction

use anyhow::Result;
use async_trait::async_trait;

/// One tracked address as stored in the `wallets` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRecord {
    pub id: i64,
    pub user_id: i64,
    pub network: String,
    pub address: String,
    pub label: String,
    pub last_tx_seen: Option<String>,
    pub created_at: Option<String>,
}

#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Returns every wallet owned by `user_id`, in storage order.
    async fn wallets_for_user(&self, user_id: i64) -> Result<Vec<WalletRecord>>;
}
