pub mod bot;
pub mod cli;
pub mod core;
pub mod providers;
pub mod render;
pub mod store;

use crate::bot::{Callback, WalletGroupsBot};
use crate::core::config::AppConfig;
use crate::core::{Classifier, GroupKey, Valuator};
use crate::providers::coingecko::CoinGeckoProvider;
use crate::store::SqliteWalletStore;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    /// List a user's wallet groups.
    Groups { user_id: i64 },
    /// Value one group (`all` for every wallet) and render its card.
    View {
        user_id: i64,
        group: String,
        out_dir: PathBuf,
    },
    /// Replay raw callback data as if a button was pressed.
    Callback {
        user_id: i64,
        data: String,
        out_dir: PathBuf,
    },
}

/// Wires the store, balance adapters and price provider described by `config`.
pub fn build_bot(config: &AppConfig) -> Result<WalletGroupsBot> {
    let timeout = config.lookup_timeout();
    let client = providers::util::http_client(timeout)?;
    let registry = providers::build_registry(&config.providers, &client);
    debug!(?registry, "Registered balance adapters");

    let prices = CoinGeckoProvider::new(&config.providers.coingecko.base_url, client);
    let valuator = Valuator::new(Arc::new(registry), Arc::new(prices))
        .with_timeout(timeout)
        .with_max_concurrent(config.max_concurrent_lookups)
        .with_network_names(config.network_names.clone());

    Ok(WalletGroupsBot::new(
        Arc::new(SqliteWalletStore::new(&config.database_path)),
        Arc::new(Classifier::new()?),
        valuator,
        config.fonts.clone(),
    ))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Wallet groups starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(database = %config.database_path.display(), "Loaded config");

    let bot = build_bot(&config)?;

    match command {
        AppCommand::Groups { user_id } => cli::groups(&bot, user_id).await,
        AppCommand::View {
            user_id,
            group,
            out_dir,
        } => {
            let selection = if group == "all" {
                Callback::All
            } else {
                Callback::Group(GroupKey::from_id(&group))
            };
            cli::callback(&bot, user_id, &selection.to_data(), &out_dir).await
        }
        AppCommand::Callback {
            user_id,
            data,
            out_dir,
        } => cli::callback(&bot, user_id, &data, &out_dir).await,
    }
}
