use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{validate_key, Error, Store};

/// A store that lives as long as the process. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        validate_key(key)?;
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        validate_key(key)?;
        self.values().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
