pub mod aggregation;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod report;
pub mod services;
pub mod state;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::processing::{ProcessingService, ProcessingSummary};
use crate::state::display_timestamp;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub struct AggregateOptions {
    pub dirs: Vec<PathBuf>,
    pub state: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub csv: bool,
    pub no_html: bool,
    pub dry_run: bool,
}

pub fn handle_aggregate(options: AggregateOptions) -> Result<()> {
    let config = build_config(&options);
    let service = ProcessingService::new(config);
    let summary = service.run(&options.dirs)?;
    print_summary(&summary);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}

fn build_config(options: &AggregateOptions) -> AppConfig {
    let mut config = AppConfig::new();
    if let Some(state) = &options.state {
        config.output.state_path = state.clone();
    }
    if let Some(output) = &options.output {
        config.output.report_dir = output.clone();
    }
    config.output.write_csv = options.csv;
    config.output.write_html = !options.no_html;
    config.output.dry_run = options.dry_run;
    config
}

fn print_summary(summary: &ProcessingSummary) {
    for path in &summary.reports {
        println!("wrote {}", path.display());
    }

    let matches: usize = summary.runs.iter().map(|r| r.matches).sum();
    println!(
        "{} {} runs, {} matches, {} leaderboards",
        "Done:".green().bold(),
        summary.runs.len(),
        matches,
        summary.leaderboards.len()
    );
    if summary.last_timestamp > 0 {
        println!("Last match: {}", display_timestamp(summary.last_timestamp));
    }

    if summary.runs.iter().any(|r| r.merge.overlaps_previous) {
        println!(
            "{} some runs overlapped previously processed timestamps and may be double counted",
            "Warning:".yellow().bold()
        );
    }
}
