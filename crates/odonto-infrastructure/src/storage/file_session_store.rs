//! File-backed session store.

use odonto_core::Result;
use odonto_core::session::SessionStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::toml_document::TomlDocument;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Keeps the persisted session entries in a single private TOML file.
///
/// Multi-key writes and removals happen in one locked atomic rewrite, so
/// the profile and token entries never get out of step on disk.
pub struct FileSessionStore {
    file: TomlDocument<SessionFile>,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: TomlDocument::new(path),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.file.read()?;
        Ok(data.and_then(|mut data| data.entries.remove(key)))
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        self.file.modify(|data| {
            for (key, value) in entries {
                data.entries.insert(key.to_string(), value.clone());
            }
        })?;
        tracing::debug!("Persisted {} session entries to {:?}", entries.len(), self.file.path());
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        let removed = self.file.modify(|data| {
            keys.iter()
                .filter(|key| data.entries.remove(**key).is_some())
                .count()
        })?;
        tracing::debug!("Removed {} session entries from {:?}", removed, self.file.path());
        Ok(())
    }
}
