//! File persistence for the game's collaborators
//!
//! Features:
//! - JSON documents written atomically (tmp file + rename)
//! - Dictionary directories of plain-text word lists
//! - Import of the legacy plain-text high score format

pub mod dictionary;
pub mod legacy;

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Everything that can go wrong reading or writing game files
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed data at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write `data` as pretty JSON, replacing `path` only once the write succeeded
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(data)?;
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)?;
    Ok(())
}
