//! Chat presentation for wallet groups, independent of any bot transport

pub mod handler;
pub mod menu;

pub use handler::{CardRenderer, WalletGroupsBot};
pub use menu::{Button, Callback, Reply};
