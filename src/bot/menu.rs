//! Transport-neutral replies and the callback-data protocol.

use crate::core::{GroupKey, GroupMap};

const CALLBACK_PREFIX: &str = "wgroup_";
const CALLBACK_ALL: &str = "all";
const CALLBACK_BACK: &str = "back";

/// A button on its own keyboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    pub callback_data: String,
}

impl Button {
    pub fn new(text: impl Into<String>, action: &Callback) -> Self {
        Self {
            text: text.into(),
            callback_data: action.to_data(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Markdown message with an optional inline keyboard.
    Message { text: String, buttons: Vec<Button> },
    /// Transient status shown while a slow operation runs.
    Notice(String),
    Photo {
        png: Vec<u8>,
        file_name: String,
        caption: String,
    },
    /// Popup answer to a callback query.
    Alert(String),
}

/// Actions carried in button callback data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Group(GroupKey),
    All,
    Back,
}

impl Callback {
    pub fn parse(data: &str) -> Option<Self> {
        let rest = data.strip_prefix(CALLBACK_PREFIX)?;
        match rest {
            "" => None,
            CALLBACK_BACK => Some(Callback::Back),
            CALLBACK_ALL => Some(Callback::All),
            id => Some(Callback::Group(GroupKey::from_id(id))),
        }
    }

    pub fn to_data(&self) -> String {
        let id = match self {
            Callback::Group(key) => key.id(),
            Callback::All => CALLBACK_ALL,
            Callback::Back => CALLBACK_BACK,
        };
        format!("{CALLBACK_PREFIX}{id}")
    }
}

pub fn empty_wallets_message() -> Reply {
    Reply::Message {
        text: "📭 No wallets added yet.\n\n\
               Use /addaddress to add wallets for monitoring.\n\n\
               💡 **Tip:** Name your wallets like:\n\
               • Trust Wallet BNB\n\
               • Trust Wallet ETH\n\
               • MetaMask Polygon\n\n\
               The bot will automatically group them!"
            .to_string(),
        buttons: Vec::new(),
    }
}

/// Group list: named groups alphabetically, "Other Wallets" last, then "View All Wallets".
pub fn groups_menu(groups: &GroupMap) -> Reply {
    let mut buttons: Vec<Button> = groups
        .iter()
        .map(|(key, wallets)| {
            let icon = match key {
                GroupKey::Named(_) => "💼",
                GroupKey::Ungrouped => "🔹",
            };
            Button::new(
                format!("{icon} {} ({})", key.display_name(), wallets.len()),
                &Callback::Group(key.clone()),
            )
        })
        .collect();
    buttons.push(Button::new("📊 View All Wallets", &Callback::All));

    let text = format!(
        "💼 **Your Wallet Groups**\n\n\
         Total wallets: {}\n\
         Groups: {}\n\n\
         Select a group to view details:",
        groups.wallet_count(),
        groups.len()
    );

    Reply::Message { text, buttons }
}

/// Keyboard under a group report.
pub fn group_detail_buttons(selected: &Callback) -> Vec<Button> {
    vec![
        Button::new("🔙 Back to Groups", &Callback::Back),
        Button::new("🔄 Refresh", selected),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Classifier, WalletRecord, group_wallets};

    fn wallet(id: i64, label: &str) -> WalletRecord {
        WalletRecord {
            id,
            user_id: 1,
            network: "ethereum".to_string(),
            address: format!("0x{id}"),
            label: label.to_string(),
            last_tx_seen: None,
            created_at: None,
        }
    }

    #[test]
    fn test_callback_parsing() {
        assert_eq!(Callback::parse("wgroup_back"), Some(Callback::Back));
        assert_eq!(Callback::parse("wgroup_all"), Some(Callback::All));
        assert_eq!(
            Callback::parse("wgroup__ungrouped"),
            Some(Callback::Group(GroupKey::Ungrouped))
        );
        assert_eq!(
            Callback::parse("wgroup_Trust Wallet"),
            Some(Callback::Group(GroupKey::Named("Trust Wallet".to_string())))
        );
        assert_eq!(Callback::parse("wgroup_"), None);
        assert_eq!(Callback::parse("alert_42"), None);
    }

    #[test]
    fn test_callback_data_matches_parse() {
        for callback in [
            Callback::Back,
            Callback::All,
            Callback::Group(GroupKey::Ungrouped),
            Callback::Group(GroupKey::Named("Cold Storage".to_string())),
        ] {
            assert_eq!(Callback::parse(&callback.to_data()), Some(callback));
        }
    }

    #[test]
    fn test_groups_menu_ordering_and_counts() {
        let classifier = Classifier::new().unwrap();
        let records = vec![
            wallet(1, "randomlabel"),
            wallet(2, "Trust Wallet ETH"),
            wallet(3, "Binance"),
            wallet(4, "Trust Wallet BNB"),
        ];
        let groups = group_wallets(&classifier, &records);

        let Reply::Message { text, buttons } = groups_menu(&groups) else {
            panic!("Expected a message reply");
        };

        assert!(text.contains("Total wallets: 4"));
        assert!(text.contains("Groups: 3"));
        let labels: Vec<&str> = buttons.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "💼 Binance (1)",
                "💼 Trust Wallet (2)",
                "🔹 Other Wallets (1)",
                "📊 View All Wallets",
            ]
        );
        assert_eq!(buttons[1].callback_data, "wgroup_Trust Wallet");
        assert_eq!(buttons[2].callback_data, "wgroup__ungrouped");
        assert_eq!(buttons[3].callback_data, "wgroup_all");
    }

    #[test]
    fn test_detail_buttons_refresh_same_selection() {
        let selected = Callback::Group(GroupKey::Named("Savings".to_string()));
        let buttons = group_detail_buttons(&selected);

        assert_eq!(buttons[0].callback_data, "wgroup_back");
        assert_eq!(buttons[1].callback_data, "wgroup_Savings");
    }
}
