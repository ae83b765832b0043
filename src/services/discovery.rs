use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::RankingError;

/// A record file and the stage it was filed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFile {
    pub stage: String,
    pub path: PathBuf,
}

/// Lists the record files of one run directory.
///
/// The run directory must contain only stage directories; every entry of a
/// stage directory is treated as a record file. Entries are returned in
/// name order.
pub fn discover_run(run_dir: &Path) -> Result<Vec<RecordFile>, RankingError> {
    ensure_directory(run_dir)?;

    let mut files = Vec::new();
    for stage_dir in sorted_entries(run_dir)? {
        ensure_directory(&stage_dir)?;
        let stage = stage_name(&stage_dir);

        for path in sorted_entries(&stage_dir)? {
            files.push(RecordFile {
                stage: stage.clone(),
                path,
            });
        }
    }

    Ok(files)
}

/// Reads a record file, replacing invalid UTF-8 rather than failing
pub fn read_record_file(path: &Path) -> Result<String, RankingError> {
    let bytes = fs::read(path).map_err(|e| RankingError::unreadable(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn ensure_directory(path: &Path) -> Result<(), RankingError> {
    let metadata = fs::metadata(path).map_err(|e| RankingError::unreadable(path, e))?;
    if metadata.is_dir() {
        Ok(())
    } else {
        Err(RankingError::not_a_directory(path))
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, RankingError> {
    let entries = fs::read_dir(dir).map_err(|e| RankingError::unreadable(dir, e))?;

    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RankingError::unreadable(dir, e))?;

    paths.sort();
    Ok(paths)
}

fn stage_name(stage_dir: &Path) -> String {
    stage_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
