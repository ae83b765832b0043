use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::{display_timestamp, GlobalState};
use crate::errors::{state_context, RankingError};

/// JSON file holding the state between invocations
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads the state, or an empty one if the file does not exist yet
    pub fn load(&self) -> Result<GlobalState> {
        if !self.path.exists() {
            info!("No state file at {}, starting fresh", self.path.display());
            return Ok(GlobalState::new());
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|e| RankingError::unreadable(&self.path, e))
            .with_context(|| state_context("load", &self.path))?;

        let state: GlobalState =
            serde_json::from_str(&json).map_err(|source| RankingError::StateCorrupt {
                path: self.path.clone(),
                source,
            })?;

        if state.ratings.is_empty() {
            info!("Loaded state from {} (no rated players yet)", self.path.display());
        } else {
            info!(
                "Loaded state from {} ({} rated players, last timestamp {})",
                self.path.display(),
                state.ratings.len(),
                display_timestamp(state.last_timestamp)
            );
        }
        Ok(state)
    }

    /// Writes to a temporary file first and renames it over the old state
    pub fn save(&self, state: &GlobalState) -> Result<()> {
        let temp_path = self.temp_path();
        let json = serde_json::to_string_pretty(state).context("Failed to serialize state")?;

        self.ensure_parent_dir()?;
        fs::write(&temp_path, json).with_context(|| state_context("write", &temp_path))?;
        fs::rename(&temp_path, &self.path).with_context(|| state_context("replace", &self.path))?;

        info!("Saved state to {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).context("Failed to create state directory")
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingState;

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));

        let state = store.load().unwrap();

        assert_eq!(state, GlobalState::new());
        assert_eq!(state.last_timestamp, 0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("nested").join("state.json"));

        let mut state = GlobalState::new();
        state.last_timestamp = 1234;
        state.stats.entry("finals", 3, "alice").add_game(12);
        state.ratings.set(
            3,
            "alice",
            RatingState {
                rating: 1550.5,
                deviation: 210.0,
                volatility: 0.0625,
            },
        );

        store.save(&state).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, state);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let err = StateStore::new(&path).load().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::StateCorrupt { .. })
        ));
    }
}
