use std::sync::RwLock;

use super::{SessionError, SessionResult, SessionStore};

/// In-process token slot
#[derive(Debug, Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already stored
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySession {
    fn get(&self) -> SessionResult<Option<String>> {
        let token = self.token.read().map_err(|_| SessionError::Poisoned)?;
        Ok(token.clone())
    }

    fn set(&self, token: &str) -> SessionResult<()> {
        *self.token.write().map_err(|_| SessionError::Poisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        *self.token.write().map_err(|_| SessionError::Poisoned)? = None;
        Ok(())
    }
}
