use std::sync::{Arc, Mutex, MutexGuard};

use super::{Result, Session, SessionError};

/// Cloneable handle for driving one [`Session`] from several threads. Every call holds
/// the lock for its whole read-modify-write.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Session>> {
        self.inner.lock().map_err(|_| SessionError::Poisoned)
    }

    pub fn with<T>(&self, action: impl FnOnce(&mut Session) -> T) -> Result<T> {
        let mut session = self.lock()?;
        Ok(action(&mut session))
    }
}
