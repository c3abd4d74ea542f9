//! LocalStorage backend (WASM only)

use super::{BEST_SCORE_KEY, ScoreStore, StorageError, parse_score};

/// Browser LocalStorage handle
fn storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(StorageError::Unavailable)
}

/// Read a raw string item
pub fn read_item(key: &str) -> Result<Option<String>, StorageError> {
    storage()?
        .get_item(key)
        .map_err(|e| StorageError::Read(format!("{e:?}")))
}

/// Write a raw string item
pub fn write_item(key: &str, value: &str) -> Result<(), StorageError> {
    storage()?
        .set_item(key, value)
        .map_err(|e| StorageError::Write(format!("{e:?}")))
}

/// Best score kept under the `bestScore` key
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl ScoreStore for LocalStorageStore {
    fn load_best_score(&self) -> Result<u64, StorageError> {
        let raw = read_item(BEST_SCORE_KEY)?;
        parse_score(raw.as_deref())
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), StorageError> {
        write_item(BEST_SCORE_KEY, &score.to_string())?;
        log::info!("Best score saved ({})", score);
        Ok(())
    }
}
