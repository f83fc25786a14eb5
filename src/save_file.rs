//! JSON save slots
//!
//! Each slot is `<save_directory>/<slot>.json` holding one [`SaveContents`].

use gametimers_core::SaveContents;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SAVE_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("invalid save slot name '{slot}'")]
    InvalidSlot { slot: String },

    #[error("failed to create save directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write save file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read save file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode save file {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse save file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to list save directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Path of a slot, rejecting names that would escape the save directory
pub fn slot_path(dir: &Path, slot: &str) -> Result<PathBuf, SaveError> {
    let valid = !slot.is_empty()
        && slot != "."
        && slot != ".."
        && !slot.contains(['/', '\\']);
    if !valid {
        return Err(SaveError::InvalidSlot {
            slot: slot.to_string(),
        });
    }
    Ok(dir.join(format!("{slot}.{SAVE_EXTENSION}")))
}

pub fn write_save(dir: &Path, slot: &str, contents: &SaveContents) -> Result<PathBuf, SaveError> {
    let path = slot_path(dir, slot)?;
    std::fs::create_dir_all(dir).map_err(|source| SaveError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let json = serde_json::to_string_pretty(contents).map_err(|source| SaveError::Encode {
        path: path.clone(),
        source,
    })?;
    std::fs::write(&path, json).map_err(|source| SaveError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Game saved");
    Ok(path)
}

pub fn read_save(dir: &Path, slot: &str) -> Result<SaveContents, SaveError> {
    let path = slot_path(dir, slot)?;
    let content = std::fs::read_to_string(&path).map_err(|source| SaveError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SaveError::Parse { path, source })
}

/// Slot names present in `dir`, sorted. A missing directory has no saves.
pub fn list_saves(dir: &Path) -> Result<Vec<String>, SaveError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|source| SaveError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut slots: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == SAVE_EXTENSION))
        .filter_map(|path| path.file_stem()?.to_str().map(String::from))
        .collect();
    slots.sort();
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gametimers_core::{GameVariables, TimeMode, TimerMap, TimerSnapshot};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "gametimers-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_slot_names_are_validated() {
        let dir = Path::new("saves");
        assert!(slot_path(dir, "slot1").is_ok());
        assert!(matches!(slot_path(dir, ""), Err(SaveError::InvalidSlot { .. })));
        assert!(matches!(slot_path(dir, ".."), Err(SaveError::InvalidSlot { .. })));
        assert!(matches!(slot_path(dir, "../x"), Err(SaveError::InvalidSlot { .. })));
        assert!(matches!(slot_path(dir, "a\\b"), Err(SaveError::InvalidSlot { .. })));
    }

    #[test]
    fn test_write_read_and_list() {
        let dir = scratch_dir("roundtrip");

        let mut timers = TimerMap::new();
        timers.insert("boss".to_string(), 1_234);
        let mut variables = GameVariables::new();
        variables.set(2, 30.0);
        let contents = SaveContents {
            saved_at: Some(5_000),
            variables: Some(variables),
            timers: Some(TimerSnapshot {
                timers: Some(timers),
                mode: TimeMode::Minutes,
                saved_at: 5_000,
            }),
        };

        write_save(&dir, "b", &contents).unwrap();
        write_save(&dir, "a", &SaveContents::default()).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(read_save(&dir, "b").unwrap(), contents);
        assert_eq!(list_saves(&dir).unwrap(), vec!["a".to_string(), "b".to_string()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_has_no_saves() {
        let dir = scratch_dir("missing");
        assert!(list_saves(&dir).unwrap().is_empty());
        assert!(matches!(read_save(&dir, "slot"), Err(SaveError::Read { .. })));
    }

    #[test]
    fn test_corrupt_save_reports_parse_error() {
        let dir = scratch_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("bad.json"), "{ not json").unwrap();

        assert!(matches!(read_save(&dir, "bad"), Err(SaveError::Parse { .. })));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
