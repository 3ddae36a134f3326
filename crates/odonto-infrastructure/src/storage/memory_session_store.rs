//! In-memory session store.

use odonto_core::session::SessionStore;
use odonto_core::{OdontoError, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Session store that lives only as long as the process.
///
/// Used for `--ephemeral` runs and as the storage double in tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> OdontoError {
    OdontoError::internal("session store lock poisoned")
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut map = self.entries.write().map_err(|_| poisoned())?;
        for (key, value) in entries {
            map.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut map = self.entries.write().map_err(|_| poisoned())?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}
