pub mod replies;
pub mod setup;
pub mod ui;

use crate::bot::{Reply, WalletGroupsBot};
use anyhow::Result;
use std::path::Path;

/// `groups`: the group list a user would see after `/wallet`.
pub async fn groups(bot: &WalletGroupsBot, user_id: i64) -> Result<()> {
    let reply = bot.wallet_command(user_id).await?;
    replies::print_replies(&[reply], Path::new("."))?;
    Ok(())
}

/// `view` and `callback`: runs one callback with a spinner while balances load.
pub async fn callback(bot: &WalletGroupsBot, user_id: i64, data: &str, out_dir: &Path) -> Result<()> {
    let pb = ui::new_spinner("Fetching balances...");
    let result = bot.callback(user_id, data).await;
    pb.finish_and_clear();

    let replies: Vec<Reply> = result?;
    if replies.is_empty() {
        println!(
            "{}",
            ui::style_text(&format!("Unknown callback: {data}"), ui::StyleType::Alert)
        );
        return Ok(());
    }
    replies::print_replies(&replies, out_dir)?;
    Ok(())
}
