use super::menu::{
    Callback, Reply, empty_wallets_message, group_detail_buttons, groups_menu,
};
use crate::core::config::FontConfig;
use crate::core::{Classifier, Holding, Valuator, WalletRecord, WalletStore, group_wallets};
use crate::render::{FontSet, load_fonts, render_caption, render_card, render_text};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument};

const ALL_WALLETS: &str = "All Wallets";

/// Produces PNG bytes for a group card, or `None` when no image could be drawn.
pub type CardRenderer = fn(&str, f64, &[Holding], &FontSet) -> Option<Vec<u8>>;

/// Handles the `/wallet` command and its `wgroup_*` callbacks for one request at a time.
pub struct WalletGroupsBot {
    store: Arc<dyn WalletStore>,
    classifier: Arc<Classifier>,
    valuator: Valuator,
    fonts: FontConfig,
    card_renderer: CardRenderer,
}

impl WalletGroupsBot {
    pub fn new(
        store: Arc<dyn WalletStore>,
        classifier: Arc<Classifier>,
        valuator: Valuator,
        fonts: FontConfig,
    ) -> Self {
        Self {
            store,
            classifier,
            valuator,
            fonts,
            card_renderer: render_card,
        }
    }

    pub fn with_card_renderer(mut self, card_renderer: CardRenderer) -> Self {
        self.card_renderer = card_renderer;
        self
    }

    /// `/wallet`: lists the user's groups.
    #[instrument(skip(self))]
    pub async fn wallet_command(&self, user_id: i64) -> Result<Reply> {
        let wallets = self.store.wallets_for_user(user_id).await?;
        if wallets.is_empty() {
            info!(user_id, "User has no wallets");
            return Ok(empty_wallets_message());
        }
        let groups = group_wallets(&self.classifier, &wallets);
        Ok(groups_menu(&groups))
    }

    /// Dispatches a callback query. Unknown data is ignored.
    #[instrument(skip(self))]
    pub async fn callback(&self, user_id: i64, data: &str) -> Result<Vec<Reply>> {
        match Callback::parse(data) {
            Some(Callback::Back) => Ok(vec![self.wallet_command(user_id).await?]),
            Some(selection) => self.show_selection(user_id, selection).await,
            None => {
                debug!(data, "Ignoring unknown callback");
                Ok(Vec::new())
            }
        }
    }

    async fn show_selection(&self, user_id: i64, selection: Callback) -> Result<Vec<Reply>> {
        let wallets = self.store.wallets_for_user(user_id).await?;
        let (display_name, selected) = self.select(&selection, wallets);

        if selected.is_empty() {
            return Ok(vec![Reply::Alert("No wallets in this group".to_string())]);
        }

        let mut replies = vec![Reply::Notice(format!(
            "⏳ Loading {display_name}...\nFetching balances for {} wallet(s)...",
            selected.len()
        ))];

        let summary = self.valuator.aggregate(&display_name, &selected).await;

        let fonts = load_fonts(&self.fonts);
        if let Some(png) = (self.card_renderer)(
            &summary.group_name,
            summary.total_usd,
            &summary.holdings,
            &fonts,
        ) {
            replies.push(Reply::Photo {
                png,
                file_name: format!("{}.png", summary.group_name.replace(' ', "_")),
                caption: render_caption(
                    &summary.group_name,
                    summary.total_usd,
                    summary.holdings.len(),
                ),
            });
        }

        replies.push(Reply::Message {
            text: render_text(&summary.group_name, summary.total_usd, &summary.details),
            buttons: group_detail_buttons(&selection),
        });
        Ok(replies)
    }

    fn select(&self, selection: &Callback, wallets: Vec<WalletRecord>) -> (String, Vec<WalletRecord>) {
        match selection {
            Callback::Group(key) => {
                let groups = group_wallets(&self.classifier, &wallets);
                let selected = groups.get(key).map(<[_]>::to_vec).unwrap_or_default();
                (key.display_name().to_string(), selected)
            }
            Callback::All | Callback::Back => (ALL_WALLETS.to_string(), wallets),
        }
    }
}
