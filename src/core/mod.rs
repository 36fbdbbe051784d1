//! Core business logic abstractions

pub mod balance;
pub mod classifier;
pub mod config;
pub mod grouping;
pub mod log;
pub mod price;
pub mod valuation;
pub mod wallet;

// Re-export main types for cleaner imports
pub use balance::{Balance, BalanceAdapter, BalanceRegistry};
pub use classifier::Classifier;
pub use grouping::{GroupKey, GroupMap, group_wallets};
pub use price::PriceProvider;
pub use valuation::{GroupSummary, Holding, Valuator, WalletDetail};
pub use wallet::{WalletRecord, WalletStore};
