//! Key-value storage for the session credential.
//!
//! This module provides:
//! - `TokenStore`: the get/set/remove capability the API client depends on
//! - `MemoryStore`: process-local storage for tests and embedding
//! - `FileStore`: a JSON map persisted in the cache directory
//! - `KeyringStore`: OS keychain storage via `keyring`
//!
//! Removing an absent key is never an error, so concurrent logouts
//! converge on the same end state.

pub mod file;
pub mod keychain;
pub mod memory;

pub use self::file::FileStore;
pub use self::keychain::KeyringStore;
pub use self::memory::MemoryStore;

use thiserror::Error;

/// Key under which the bearer token is stored
pub const TOKEN_KEY: &str = "token";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store file: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Succeeds when the key is already absent.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
