use anyhow::Result;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::Config;

/// Where the bearer token lives between runs
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: String) -> Result<()>;

    /// Forget the token; called when the server answers 401
    fn clear(&self) -> Result<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Token kept in the config file (`[auth] token`)
pub struct ConfigTokenStore {
    path: PathBuf,
    token: Mutex<Option<String>>,
}

impl ConfigTokenStore {
    pub fn new(path: PathBuf, config: Config) -> Self {
        let token = config.is_authenticated().then_some(config.auth.token);
        Self {
            path,
            token: Mutex::new(token),
        }
    }

    /// Rewrite only the token, leaving the rest of the file as stored
    fn persist(&self, token: Option<&str>) -> Result<()> {
        let mut stored = Config::load_stored(&self.path)?;
        match token {
            Some(token) => stored.set_token(token.to_string()),
            None => stored.clear_token(),
        }
        stored.save_to(&self.path)
    }
}

impl TokenStore for ConfigTokenStore {
    fn token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    fn set_token(&self, token: String) -> Result<()> {
        let mut current = lock(&self.token);
        self.persist(Some(&token))?;
        *current = Some(token);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut current = lock(&self.token);
        if current.is_none() {
            return Ok(());
        }
        self.persist(None)?;
        *current = None;
        tracing::info!("Cleared stored bearer token");
        Ok(())
    }
}

/// Process-local token, for tests and one-off tooling
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    fn set_token(&self, token: String) -> Result<()> {
        *lock(&self.token) = Some(token);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *lock(&self.token) = None;
        Ok(())
    }
}
