//! Partitions wallet records into label groups

use super::classifier::Classifier;
use super::wallet::WalletRecord;
use std::collections::BTreeMap;
use std::fmt::Display;

const UNGROUPED_ID: &str = "_ungrouped";

/// Identifies a group. Orders named groups alphabetically with the ungrouped bucket last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Named(String),
    Ungrouped,
}

impl GroupKey {
    /// Stable identifier used in callback data.
    pub fn id(&self) -> &str {
        match self {
            GroupKey::Named(name) => name,
            GroupKey::Ungrouped => UNGROUPED_ID,
        }
    }

    pub fn from_id(id: &str) -> Self {
        if id == UNGROUPED_ID {
            GroupKey::Ungrouped
        } else {
            GroupKey::Named(id.to_string())
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            GroupKey::Named(name) => name,
            GroupKey::Ungrouped => "Other Wallets",
        }
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Wallets bucketed by group key. Each bucket keeps input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMap {
    groups: BTreeMap<GroupKey, Vec<WalletRecord>>,
}

impl GroupMap {
    pub fn get(&self, key: &GroupKey) -> Option<&[WalletRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Named groups by name, then the ungrouped bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[WalletRecord])> {
        self.groups.iter().map(|(key, wallets)| (key, wallets.as_slice()))
    }

    /// Number of buckets, counting the ungrouped bucket when present.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn has_ungrouped(&self) -> bool {
        self.groups.contains_key(&GroupKey::Ungrouped)
    }

    pub fn wallet_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Classifies each record's label and appends it to its bucket.
pub fn group_wallets(classifier: &Classifier, records: &[WalletRecord]) -> GroupMap {
    let mut groups: BTreeMap<GroupKey, Vec<WalletRecord>> = BTreeMap::new();
    for record in records {
        let key = classifier
            .classify(&record.label)
            .map_or(GroupKey::Ungrouped, GroupKey::Named);
        groups.entry(key).or_default().push(record.clone());
    }
    GroupMap { groups }
}
