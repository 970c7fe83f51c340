use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage backend is unavailable")]
    Unavailable,
    #[error("Storage quota exceeded")]
    QuotaExceeded,
    #[error("Storage operation failed: {0}")]
    Failed(String),
}

/// Key written and removed again by [`Storage::probe`].
pub const PROBE_KEY: &str = "__twostars_probe__";

/// String key-value store the game state lives in.
///
/// Every call may fail and callers degrade to "absent" instead of giving up on
/// the game. Methods take `&self`; backends own their interior mutability.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Checks the backend accepts writes at all.
    fn probe(&self) -> Result<(), StorageError> {
        self.set(PROBE_KEY, PROBE_KEY)?;
        self.remove(PROBE_KEY)
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        (**self).keys_with_prefix(prefix)
    }

    fn probe(&self) -> Result<(), StorageError> {
        (**self).probe()
    }
}
