use crate::core::{WalletRecord, WalletStore};
use anyhow::Result;
use async_trait::async_trait;

/// Fixed in-memory wallet list.
#[derive(Debug, Clone, Default)]
pub struct MemoryWalletStore {
    wallets: Vec<WalletRecord>,
}

impl MemoryWalletStore {
    pub fn new(wallets: Vec<WalletRecord>) -> Self {
        Self { wallets }
    }
}

#[async_trait]
impl WalletStore for MemoryWalletStore {
    async fn wallets_for_user(&self, user_id: i64) -> Result<Vec<WalletRecord>> {
        Ok(self
            .wallets
            .iter()
            .filter(|wallet| wallet.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(id: i64, user_id: i64) -> WalletRecord {
        WalletRecord {
            id,
            user_id,
            network: "ethereum".to_string(),
            address: format!("0x{id}"),
            label: "Main".to_string(),
            last_tx_seen: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_filters_by_user_and_keeps_order() {
        let store = MemoryWalletStore::new(vec![wallet(3, 1), wallet(1, 2), wallet(2, 1)]);

        let ids: Vec<i64> = store
            .wallets_for_user(1)
            .await
            .unwrap()
            .iter()
            .map(|w| w.id)
            .collect();

        assert_eq!(ids, vec![3, 2]);
    }
}
