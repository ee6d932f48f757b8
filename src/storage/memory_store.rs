use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::Result;
use crate::storage::BackingStore;

/// In-memory backing store. Holds payloads for the lifetime of the process;
/// also serves as the storage double in tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a payload, e.g. to simulate a previous session in tests.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl BackingStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
