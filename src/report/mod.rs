mod csv_writer;
mod html_writer;

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregation::Leaderboard;
use crate::config::{mode_config, OutputSettings};

pub use csv_writer::{csv_header, write_csv};
pub use html_writer::render_html;

/// Writes every enabled report format for every leaderboard. Returns the files written.
pub fn write_reports(
    leaderboards: &[Leaderboard],
    settings: &OutputSettings,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&settings.report_dir).with_context(|| {
        format!("Failed to create report directory {}", settings.report_dir.display())
    })?;

    let mut written = Vec::new();
    for leaderboard in leaderboards {
        if settings.write_html {
            let path = report_path(&settings.report_dir, leaderboard, "html");
            html_writer::write_html(leaderboard, &path)?;
            written.push(path);
        }
        if settings.write_csv {
            let path = report_path(&settings.report_dir, leaderboard, "csv");
            write_csv(leaderboard, &path)?;
            written.push(path);
        }
    }

    info!("  → Wrote {} report files", written.len());
    Ok(written)
}

/// `<mode>_<stage>.<extension>` inside `dir`
pub fn report_path(dir: &Path, leaderboard: &Leaderboard, extension: &str) -> PathBuf {
    let mode = mode_config(leaderboard.mode);
    dir.join(format!("{}_{}.{}", mode.slug, leaderboard.stage, extension))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path() {
        let path = report_path(Path::new("out"), &fixtures::leaderboard(), "html");
        assert_eq!(path, Path::new("out").join("insta_finals.html"));
    }

    #[test]
    fn test_write_reports_respects_formats() {
        let dir = tempfile::tempdir().unwrap();
        let settings = OutputSettings {
            report_dir: dir.path().join("reports"),
            write_html: true,
            write_csv: true,
            ..OutputSettings::default()
        };

        let written = write_reports(&[fixtures::leaderboard()], &settings).unwrap();

        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|p| p.exists()));
    }
}
