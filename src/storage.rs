/// Key-value persistence port used by the palette store.
use thiserror::Error;

/// Storage key holding the serialized history list.
pub const HISTORY_KEY: &str = "colorHistory";

/// Storage key holding the serialized favorites list.
pub const FAVORITES_KEY: &str = "colorFavorites";

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite failure while reading or writing an entry.
    #[error("storage database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Serialization failure while encoding a palette list.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Shared trait implemented by palette persistence backends.
pub trait PaletteStorage {
    /// Read the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
pub use memory::MemoryStorage;
