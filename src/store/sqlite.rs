//! Read-only access to the bot's `wallets` table.

use crate::core::{WalletRecord, WalletStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, Row, params};
use std::path::{Path, PathBuf};
use tracing::debug;

// Columns are read by position: id, user_id, network, address, label, last tx, created at.
const SELECT_WALLETS: &str = "SELECT * FROM wallets WHERE user_id = ?1 ORDER BY 1";

/// Bookkeeping column rendered as text whatever its storage type; absent columns read as `None`.
fn loose_text(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<String>> {
    if index >= row.as_ref().column_count() {
        return Ok(None);
    }
    Ok(match row.get::<_, Value>(index)? {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(text) => Some(text),
        Value::Blob(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
    })
}

pub struct SqliteWalletStore {
    path: PathBuf,
}

impl SqliteWalletStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn query(path: &Path, user_id: i64) -> Result<Vec<WalletRecord>> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("Failed to open wallet database at {}", path.display()))?;

        let mut stmt = conn
            .prepare(SELECT_WALLETS)
            .context("Failed to prepare wallet query")?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok(WalletRecord {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    network: row.get(2)?,
                    address: row.get(3)?,
                    label: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    last_tx_seen: loose_text(row, 5)?,
                    created_at: loose_text(row, 6)?,
                })
            })
            .context("Failed to query wallets")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read wallet row")
    }
}

#[async_trait]
impl WalletStore for SqliteWalletStore {
    async fn wallets_for_user(&self, user_id: i64) -> Result<Vec<WalletRecord>> {
        let path = self.path.clone();
        let wallets = tokio::task::spawn_blocking(move || Self::query(&path, user_id))
            .await
            .context("Wallet query task panicked")??;
        debug!(user_id, count = wallets.len(), "Loaded wallets");
        Ok(wallets)
    }
}
