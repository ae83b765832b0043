use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use super::discovery::{discover_run, read_record_file};
use crate::aggregation::{
    build_leaderboards, GlobalMerger, Leaderboard, MergeSummary, RunAggregator,
};
use crate::config::settings::AppConfig;
use crate::domain::{resolve_duplicates, MatchAssembler, ReadProgress};
use crate::errors::run_context;
use crate::rating::RatingEngine;
use crate::report;
use crate::state::{GlobalState, StateStore};

/// Outcome of one processing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub path: PathBuf,
    pub files: usize,
    pub lines: usize,
    pub matches: usize,
    pub duplicate_groups: usize,
    pub uncounted: usize,
    pub merge: MergeSummary,
}

/// Outcome of a whole invocation
#[derive(Debug, Clone)]
pub struct ProcessingSummary {
    pub runs: Vec<RunSummary>,
    pub leaderboards: Vec<Leaderboard>,
    pub reports: Vec<PathBuf>,
    pub last_timestamp: i64,
}

pub struct ProcessingService {
    config: AppConfig,
    engine: RatingEngine,
    store: StateStore,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Self {
        let engine = RatingEngine::new(&config.rating);
        let store = StateStore::new(&config.output.state_path);
        Self {
            config,
            engine,
            store,
        }
    }

    /// Processes every run directory in order, then writes reports and the state.
    ///
    /// Any error aborts before anything is written.
    pub fn run(&self, run_dirs: &[PathBuf]) -> Result<ProcessingSummary> {
        info!("=== Starting Aggregation ===\n");

        let mut state = self.store.load()?;
        let mut runs = Vec::with_capacity(run_dirs.len());

        for run_dir in run_dirs {
            let summary = self
                .process_run(run_dir, &mut state)
                .with_context(|| run_context(run_dir))?;
            runs.push(summary);
        }

        let leaderboards = self.leaderboards(&state);
        info!("  → Built {} leaderboards\n", leaderboards.len());

        let reports = self.persist(&state, &leaderboards)?;

        info!("=== Aggregation Complete ===");
        Ok(ProcessingSummary {
            runs,
            leaderboards,
            reports,
            last_timestamp: state.last_timestamp,
        })
    }

    /// Reads, reconciles and aggregates one run directory and merges it into `state`
    pub fn process_run(&self, run_dir: &Path, state: &mut GlobalState) -> Result<RunSummary> {
        info!("Processing run {}", run_dir.display());

        let files = discover_run(run_dir)?;
        let mut assembler = MatchAssembler::new();
        let mut progress = ReadProgress::new(files.len());

        for file in &files {
            let contents = read_record_file(&file.path)?;
            let accepted = assembler.add_file(&file.path, &file.stage, &contents);
            progress.record_file(accepted);
        }

        if assembler.is_empty() {
            warn!("Run {} holds no usable record lines", run_dir.display());
        }
        info!("  → Collected {} candidate matches", assembler.len());

        let mut matches = assembler.into_matches();
        info!("  → Assembled {} complete matches", matches.len());

        let duplicates = resolve_duplicates(&mut matches);
        if duplicates.groups > 0 {
            info!(
                "  → {} player pairs met more than once, {} matches not rated",
                duplicates.groups, duplicates.uncounted
            );
        }

        let prior = self.engine.default_rating();
        let run = RunAggregator::new(&self.config.aggregation, &state.ratings, prior)
            .aggregate(&matches);

        let merger = GlobalMerger::new(&self.engine, self.config.rating.decay_inactive);
        let merge = merger.merge(state, &run);

        Ok(RunSummary {
            path: run_dir.to_path_buf(),
            files: files.len(),
            lines: progress.lines(),
            matches: matches.len(),
            duplicate_groups: duplicates.groups,
            uncounted: duplicates.uncounted,
            merge,
        })
    }

    pub fn leaderboards(&self, state: &GlobalState) -> Vec<Leaderboard> {
        build_leaderboards(&state.stats, &state.ratings, self.engine.default_rating())
    }

    fn persist(&self, state: &GlobalState, leaderboards: &[Leaderboard]) -> Result<Vec<PathBuf>> {
        if self.config.output.dry_run {
            info!("Dry run: reports and state not written");
            return Ok(Vec::new());
        }

        let reports = report::write_reports(leaderboards, &self.config.output)?;
        self.store.save(state)?;
        Ok(reports)
    }
}
