use std::path::{Path, PathBuf};

use thiserror::Error;

/// Structural failures that abort a whole invocation
#[derive(Error, Debug)]
pub enum RankingError {
    #[error("{path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read {path}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is corrupt")]
    StateCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write report {path}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RankingError {
    pub fn not_a_directory(path: &Path) -> Self {
        Self::NotADirectory {
            path: path.to_path_buf(),
        }
    }

    pub fn unreadable(path: &Path, source: std::io::Error) -> Self {
        Self::UnreadableFile {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Context message for state file operations
pub fn state_context(operation: &str, path: &Path) -> String {
    format!("Failed to {} state file: {}", operation, path.display())
}

/// Context message for a processing run
pub fn run_context(path: &Path) -> String {
    format!("Failed to process run: {}", path.display())
}
