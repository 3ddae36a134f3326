//! Unified path management for odonto configuration and session files.
//!
//! This ensures consistency across all platforms (Linux, macOS, Windows).

use std::path::{Path, PathBuf};

const APP_DIR: &str = "odonto";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for odonto.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/odonto/            # Config directory
/// ├── config.toml              # Client configuration
/// └── logs/                    # Application logs
///     └── odonto.log.YYYY-MM-DD
///
/// ~/.local/share/odonto/       # Data directory
/// └── session.toml             # Persisted profile + access token
/// ```
///
/// A base path replaces both roots, which keeps tests inside a temp dir.
#[derive(Debug, Clone, Default)]
pub struct OdontoPaths {
    base: Option<PathBuf>,
}

impl OdontoPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the odonto configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/odonto/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the odonto data directory.
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session file.
    ///
    /// # Security Note
    ///
    /// The file holds the bearer token; it is written with mode 600 on Unix.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("session.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_dir() {
        let config_dir = OdontoPaths::default().config_dir().unwrap();
        assert!(config_dir.ends_with("odonto"));
    }

    #[test]
    fn test_files_live_under_base() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = OdontoPaths::new(Some(temp_dir.path()));

        assert_eq!(paths.config_file().unwrap(), temp_dir.path().join("config.toml"));
        assert_eq!(paths.session_file().unwrap(), temp_dir.path().join("session.toml"));
        assert!(paths.logs_dir().unwrap().starts_with(temp_dir.path()));
    }
}
