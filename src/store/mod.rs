pub mod memory;
pub mod sqlite;

pub use memory::MemoryWalletStore;
pub use sqlite::SqliteWalletStore;
