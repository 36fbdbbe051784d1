use super::format_usd;
use crate::core::WalletDetail;
use std::fmt::Write;

const SEPARATOR_WIDTH: usize = 36;

/// `0x12345678...9abcdef0`; short addresses are shown whole.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 18 {
        return address.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{head}...{tail}")
}

/// Photo caption sent with the card.
pub fn render_caption(group_name: &str, total_usd: f64, networks: usize) -> String {
    format!(
        "💼 **{group_name}**\n\n💰 Total Value: **{}**\n📊 Networks: {networks}",
        format_usd(total_usd)
    )
}

/// Markdown report listing every wallet in the group.
pub fn render_text(group_name: &str, total_usd: f64, details: &[WalletDetail]) -> String {
    let mut text = format!("💼 **{group_name}**\n");
    text.push_str(&"━".repeat(SEPARATOR_WIDTH));
    text.push_str("\n\n");
    let _ = writeln!(text, "💰 **Total Value:** {}", format_usd(total_usd));
    let _ = writeln!(text, "📊 **Networks:** {}\n", details.len());
    text.push_str("**Holdings:**\n\n");

    for detail in details {
        let holding = &detail.holding;
        let _ = writeln!(text, "🔹 **{}**", detail.label);
        let _ = writeln!(text, "   🌐 {}", holding.network_display);
        let _ = writeln!(text, "   📍 `{}`", short_address(&detail.address));
        let _ = writeln!(
            text,
            "   💎 {:.6} {}",
            holding.native_amount, holding.token_symbol
        );
        let _ = writeln!(text, "   💵 {}\n", format_usd(holding.usd_value));
    }

    text
}
