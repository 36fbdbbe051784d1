//! Maps free-text wallet labels onto group names

use anyhow::{Context, Result};
use regex::Regex;
use std::cmp::Reverse;
use tracing::debug;

/// Wallet brands, exchanges and generic categories recognised inside labels.
pub const KNOWN_WALLET_NAMES: &[&str] = &[
    // Popular wallets
    "Trust Wallet",
    "MetaMask",
    "Coinbase Wallet",
    "Ledger",
    "Trezor",
    "Exodus",
    "Phantom",
    "Rainbow",
    "SafePal",
    "Argent",
    "Zerion",
    "Rabby",
    // Exchanges
    "Binance",
    "Coinbase",
    "Kraken",
    "Kucoin",
    "Bybit",
    "OKX",
    "Huobi",
    "Gate.io",
    "Bitfinex",
    "Gemini",
    // Hardware
    "Ledger Nano",
    "Trezor One",
    "Trezor Model T",
    "KeepKey",
    "BitBox",
    "CoolWallet",
    // Categories
    "Main",
    "Trading",
    "Savings",
    "Cold Storage",
    "Hot Wallet",
    "DeFi",
    "NFT",
    "Gaming",
    "Staking",
    "Airdrop",
    "Personal",
    "Business",
    "Family",
    "Friends",
];

/// Tried in order against the original label once no reference name matched.
const LABEL_PATTERNS: &[&str] = &[
    r"^([A-Za-z0-9]+)\s+Wallet",
    r"^([A-Za-z0-9]+)\s+Exchange",
    r"^([A-Za-z0-9]+)\s+\w+$",
];

#[derive(Debug, Clone)]
struct ReferenceName {
    canonical: String,
    lowered: String,
}

/// Classifies labels against an ordered reference list, longest names first.
#[derive(Debug, Clone)]
pub struct Classifier {
    names: Vec<ReferenceName>,
    patterns: Vec<Regex>,
}

impl Classifier {
    /// Builds a classifier over [`KNOWN_WALLET_NAMES`].
    pub fn new() -> Result<Self> {
        Self::with_names(KNOWN_WALLET_NAMES.iter().copied())
    }

    pub fn with_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<ReferenceName> = names
            .into_iter()
            .filter_map(|name| {
                let canonical: String = name.into();
                (!canonical.is_empty()).then(|| ReferenceName {
                    lowered: canonical.to_lowercase(),
                    canonical,
                })
            })
            .collect();
        // Stable: equal lengths keep list order.
        names.sort_by_key(|name| Reverse(name.canonical.chars().count()));

        let patterns = LABEL_PATTERNS
            .iter()
            .map(|pattern| {
                Regex::new(pattern).with_context(|| format!("Invalid label pattern: {pattern}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { names, patterns })
    }

    /// Reference names in matching order.
    pub fn reference_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|name| name.canonical.as_str())
    }

    /// Returns the group a label belongs to, or `None` when it should stay ungrouped.
    pub fn classify(&self, label: &str) -> Option<String> {
        if label.is_empty() {
            return None;
        }

        let label_lower = label.to_lowercase();
        if let Some(name) = self
            .names
            .iter()
            .find(|name| label_lower.contains(&name.lowered))
        {
            debug!(label, group = %name.canonical, "Label matched reference name");
            return Some(name.canonical.clone());
        }

        let group = self
            .patterns
            .iter()
            .find_map(|pattern| pattern.captures(label))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        debug!(label, ?group, "Label classified by pattern");
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new().unwrap()
    }

    #[test]
    fn test_reference_names_match_case_insensitively() {
        let c = classifier();
        assert_eq!(c.classify("Trust Wallet BNB").as_deref(), Some("Trust Wallet"));
        assert_eq!(c.classify("MetaMask ETH Main").as_deref(), Some("MetaMask"));
        assert_eq!(c.classify("Binance Trading").as_deref(), Some("Binance"));
        assert_eq!(c.classify("My Main Wallet").as_deref(), Some("Main"));
        assert_eq!(c.classify("my metamask").as_deref(), Some("MetaMask"));
        assert_eq!(c.classify("OLD KRAKEN acct").as_deref(), Some("Kraken"));
    }

    #[test]
    fn test_every_reference_name_keeps_canonical_casing() {
        let c = classifier();
        for name in KNOWN_WALLET_NAMES {
            let label = format!("x {} y", name.to_uppercase());
            assert_eq!(c.classify(&label).as_deref(), Some(*name), "label {label}");
        }
    }

    #[test]
    fn test_longest_reference_name_wins() {
        let c = classifier();
        assert_eq!(c.classify("trezor model t vault").as_deref(), Some("Trezor Model T"));
        assert_eq!(c.classify("Trezor backup").as_deref(), Some("Trezor"));
        assert_eq!(c.classify("Ledger Nano X").as_deref(), Some("Ledger Nano"));
        assert_eq!(c.classify("Coinbase Wallet USDC").as_deref(), Some("Coinbase Wallet"));
        assert_eq!(c.classify("Coinbase Pro").as_deref(), Some("Coinbase"));
    }

    #[test]
    fn test_equal_length_ties_keep_list_order() {
        let c = Classifier::with_names(["Alpha", "Bravo"]).unwrap();
        assert_eq!(c.classify("bravo alpha").as_deref(), Some("Alpha"));

        let c = Classifier::with_names(["Bravo", "Alpha"]).unwrap();
        assert_eq!(c.classify("bravo alpha").as_deref(), Some("Bravo"));
    }

    #[test]
    fn test_reference_names_sorted_by_length() {
        let c = classifier();
        let names: Vec<&str> = c.reference_names().collect();
        assert_eq!(names.len(), KNOWN_WALLET_NAMES.len());
        assert_eq!(names[0], "Coinbase Wallet");
        assert!(
            names
                .windows(2)
                .all(|pair| pair[0].chars().count() >= pair[1].chars().count())
        );
    }

    #[test]
    fn test_structural_patterns() {
        let c = classifier();
        assert_eq!(c.classify("Xyzzy Wallet").as_deref(), Some("Xyzzy"));
        assert_eq!(c.classify("Acme Exchange").as_deref(), Some("Acme"));
        assert_eq!(c.classify("Xyzzy Wallet extra words").as_deref(), Some("Xyzzy"));
        assert_eq!(c.classify("Foo bar").as_deref(), Some("Foo"));
    }

    #[test]
    fn test_wallet_pattern_is_case_sensitive() {
        let c = classifier();
        // Lowercase "wallet" falls through to the two-token pattern.
        assert_eq!(c.classify("Xyzzy wallet").as_deref(), Some("Xyzzy"));
        // Three tokens without a capitalised keyword match nothing.
        assert_eq!(c.classify("Xyzzy wallet two"), None);
    }

    #[test]
    fn test_patterns_anchor_at_start() {
        let c = classifier();
        assert_eq!(c.classify("my xyzzy Exchange account"), None);
        assert_eq!(c.classify(" Xyzzy Wallet"), None);
    }

    #[test]
    fn test_no_match() {
        let c = classifier();
        assert_eq!(c.classify("randomlabel"), None);
        assert_eq!(c.classify(""), None);
        assert_eq!(c.classify("one two three"), None);
    }
}
