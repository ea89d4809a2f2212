//! Host key-value storage for the best score
//!
//! The simulation only ever persists one scalar, written as decimal text
//! under `BEST_SCORE_KEY`:
//! - `MemoryStore`: in-process map (tests, headless runs without a file)
//! - `FileStore`: JSON map on disk (native)
//! - `LocalStore`: browser LocalStorage (wasm32)

mod file;
#[cfg(target_arch = "wasm32")]
mod local;
mod memory;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;

use crate::consts::BEST_SCORE_KEY;

/// Storage failures. Callers in the game loop log these and move on.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage provided by the host
pub trait KeyValueStore {
    /// Stored value, or `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Parse a stored best score. Anything that isn't a finite number is 0.
pub fn parse_best_score(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            log::warn!("Ignoring malformed best score {:?}", raw);
            0.0
        }
    }
}

/// Read the best score, defaulting to 0
pub fn load_best_score<S: KeyValueStore + ?Sized>(store: &S) -> f64 {
    store
        .get(BEST_SCORE_KEY)
        .map(|raw| parse_best_score(&raw))
        .unwrap_or(0.0)
}

/// Write the best score as decimal text
pub fn save_best_score<S: KeyValueStore + ?Sized>(
    store: &mut S,
    best: f64,
) -> Result<(), StorageError> {
    store.set(BEST_SCORE_KEY, &best.to_string())
}
