//! A TOML document on disk shared between processes.
//!
//! Every change runs under an exclusive `fs2` lock on a sibling
//! `<name>.lock` file and lands through a private temp file that is
//! fsynced and renamed over the document. Readers take a shared lock.

use fs2::FileExt;
use odonto_core::OdontoError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TomlDocumentError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed TOML in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not encode TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("could not lock {path:?}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<TomlDocumentError> for OdontoError {
    fn from(e: TomlDocumentError) -> Self {
        match e {
            TomlDocumentError::Parse { source, .. } => source.into(),
            TomlDocumentError::Encode(source) => source.into(),
            other => OdontoError::io(other.to_string()),
        }
    }
}

type Result<T> = std::result::Result<T, TomlDocumentError>;

fn io_at(path: &Path) -> impl FnOnce(io::Error) -> TomlDocumentError + '_ {
    move |source| TomlDocumentError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub struct TomlDocument<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> TomlDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current contents; `None` when the file is missing or blank.
    pub fn read(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let _lock = DocumentLock::shared(&self.lock_path())?;
        self.read_unlocked()
    }

    /// Applies `change` to the current contents (or `T::default()`) and
    /// writes the result back. Returns whatever `change` returns.
    pub fn modify<R>(&self, change: impl FnOnce(&mut T) -> R) -> Result<R> {
        self.ensure_parent()?;
        let _lock = DocumentLock::exclusive(&self.lock_path())?;

        let mut doc = self.read_unlocked()?.unwrap_or_default();
        let outcome = change(&mut doc);
        self.replace(&doc)?;
        Ok(outcome)
    }

    fn read_unlocked(&self) -> Result<Option<T>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_at(&self.path)(e)),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        toml::from_str(&raw)
            .map(Some)
            .map_err(|source| TomlDocumentError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn replace(&self, doc: &T) -> Result<()> {
        let encoded = toml::to_string_pretty(doc)?;
        let staging = self.sibling(".tmp");

        let mut file = File::create(&staging).map_err(io_at(&staging))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(io_at(&staging))?;
        }
        file.write_all(encoded.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(io_at(&staging))?;
        drop(file);

        fs::rename(&staging, &self.path).map_err(io_at(&self.path))
    }

    fn ensure_parent(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(io_at(parent))
            }
            _ => Ok(()),
        }
    }

    fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

/// Advisory lock released when dropped.
struct DocumentLock {
    file: File,
}

impl DocumentLock {
    fn open(path: &Path) -> Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(io_at(path))
    }

    fn exclusive(path: &Path) -> Result<Self> {
        let file = Self::open(path)?;
        file.lock_exclusive().map_err(|source| TomlDocumentError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { file })
    }

    fn shared(path: &Path) -> Result<Self> {
        let file = Self::open(path)?;
        file.lock_shared().map_err(|source| TomlDocumentError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { file })
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
