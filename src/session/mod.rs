//! Session Storage
//!
//! The bearer token is the only piece of client state that outlives a
//! request. Its presence is what makes a user "logged in"; removing it is
//! how a user logs out or how an invalid session is discarded.
//!
//! ## Stores
//!
//! - **MemorySession**: in-process slot, used by tests and embedders
//! - **FileSession**: JSON file on disk holding the token under [`TOKEN_KEY`]

mod file;
mod memory;

pub use file::FileSession;
pub use memory::MemorySession;

use std::path::PathBuf;
use thiserror::Error;

/// Fixed key the token is stored under
pub const TOKEN_KEY: &str = "token";

/// Read/write access to the stored bearer token
pub trait SessionStore: Send + Sync {
    /// Current token, if one is stored
    fn get(&self) -> SessionResult<Option<String>>;

    /// Replace the stored token
    fn set(&self, token: &str) -> SessionResult<()>;

    /// Remove the stored token
    fn clear(&self) -> SessionResult<()>;

    /// Whether a token is present
    fn is_authenticated(&self) -> SessionResult<bool> {
        Ok(self.get()?.is_some())
    }
}

/// Errors that can occur when reading or writing the session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt session file {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session lock poisoned")]
    Poisoned,
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
