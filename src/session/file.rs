use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{SessionError, SessionResult, SessionStore, TOKEN_KEY};

/// Token persisted in a small JSON document on disk
///
/// Other keys in the document are preserved, so the file can be shared
/// with other client settings.
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> SessionResult<Map<String, Value>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_document(&self, document: &Map<String, Value>) -> SessionResult<()> {
        let io_err = |source: std::io::Error| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let content = serde_json::to_string_pretty(document).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        let mut file = self.open_private().map_err(io_err)?;
        file.write_all(content.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        Ok(())
    }

    /// Open for writing, owner-only on unix from the moment the file exists
    ///
    /// `mode` only applies to newly created files; an existing file is
    /// narrowed before anything is written to it.
    fn open_private(&self) -> std::io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let file = options.open(&self.path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(file)
    }
}

impl SessionStore for FileSession {
    fn get(&self) -> SessionResult<Option<String>> {
        let document = self.read_document()?;
        Ok(document
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string))
    }

    fn set(&self, token: &str) -> SessionResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| SessionError::Poisoned)?;
        let mut document = self.read_document()?;
        document.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_document(&document)?;
        tracing::debug!(path = ?self.path, "Session token stored");
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| SessionError::Poisoned)?;
        let mut document = self.read_document()?;
        if document.remove(TOKEN_KEY).is_some() {
            self.write_document(&document)?;
            tracing::debug!(path = ?self.path, "Session token cleared");
        }
        Ok(())
    }
}
