//! Key-value blob storage for the application state.
//!
//! A [`Store`] keeps one string value per key and nothing else. The typed helpers [`load`],
//! [`try_load`] and [`save`] move JSON-serializable values in and out of it. Reads never fail
//! the caller: [`load`] logs what went wrong and substitutes the supplied default, while
//! [`try_load`] reports corrupt data as [`Error::Corrupt`] for callers that want to tell the
//! difference.

use std::io;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("failed to access {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("value stored under {key:?} is corrupt")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize value for {key:?}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait Store: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
}

/// Reads and deserializes the value stored under `key`. Returns `Ok(None)` if nothing is stored.
pub fn try_load<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>, Error> {
    store
        .get(key)?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| Error::Corrupt {
                key: key.to_owned(),
                source,
            })
        })
        .transpose()
}

/// Like [`try_load`], but any failure, including corrupt data, yields `default()`.
pub fn load<T: DeserializeOwned>(store: &dyn Store, key: &str, default: impl FnOnce() -> T) -> T {
    match try_load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            log::info!("nothing stored under {:?}, using default", key);
            default()
        }
        Err(e) => {
            log::warn!("discarding stored value: {:#}", anyhow::Error::from(e));
            default()
        }
    }
}

pub fn save<T: Serialize>(store: &dyn Store, key: &str, value: &T) -> Result<(), Error> {
    let raw = serde_json::to_string(value).map_err(|source| Error::Serialize {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &raw)
}

/// Keys double as file names, so they are restricted to ASCII alphanumerics, `-` and `_`.
pub(crate) fn validate_key(key: &str) -> Result<(), Error> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
mod tests;
