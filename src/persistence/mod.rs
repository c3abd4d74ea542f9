//! Best score persistence
//!
//! Features:
//! - One integer, stored as a decimal string (LocalStorage on web)
//! - Missing value reads as 0
//! - Failures surface as [`StorageError`]; callers log and degrade

#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use thiserror::Error;

/// LocalStorage key (shared with earlier releases of the game)
pub const BEST_SCORE_KEY: &str = "bestScore";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("stored best score {0:?} is not a non-negative integer")]
    Corrupt(String),
}

/// Where the best score lives between sessions
pub trait ScoreStore {
    fn load_best_score(&self) -> Result<u64, StorageError>;
    fn save_best_score(&mut self, score: u64) -> Result<(), StorageError>;
}

/// Decode a stored value; an absent value is a fresh install (0)
pub fn parse_score(raw: Option<&str>) -> Result<u64, StorageError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(text) => text
            .parse::<u64>()
            .map_err(|_| StorageError::Corrupt(text.to_string())),
    }
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    unavailable: bool,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_best(score: u64) -> Self {
        Self {
            raw: Some(score.to_string()),
            ..Self::default()
        }
    }

    /// Store pre-seeded with an arbitrary raw value
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: Some(raw.to_string()),
            ..Self::default()
        }
    }

    /// Store whose every operation fails
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&self) -> Result<u64, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        parse_score(self.raw.as_deref())
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.raw = Some(score.to_string());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(None), Ok(0));
        assert_eq!(parse_score(Some("")), Ok(0));
        assert_eq!(parse_score(Some(" 42 ")), Ok(42));
        assert_eq!(
            parse_score(Some("-3")),
            Err(StorageError::Corrupt("-3".to_string()))
        );
        assert!(matches!(
            parse_score(Some("lots")),
            Err(StorageError::Corrupt(_))
        ));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_best_score(), Ok(0));
        store.save_best_score(17).expect("memory save");
        assert_eq!(store.load_best_score(), Ok(17));
        assert_eq!(store.raw(), Some("17"));
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_unavailable_store_fails() {
        let mut store = MemoryStore::unavailable();
        assert_eq!(store.load_best_score(), Err(StorageError::Unavailable));
        assert_eq!(store.save_best_score(5), Err(StorageError::Unavailable));
        assert_eq!(store.saves, 0);
    }
}
