pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::errors::Result;

/// Synchronous string-keyed backing store. Each repository serializes its
/// whole collection to a single key, so a `set` is durable by the time it
/// returns.
pub trait BackingStore: Send + Sync {
    /// Read the raw payload stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous payload.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
