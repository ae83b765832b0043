use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "duel ranking aggregator")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Merge run directories into the cumulative state and write leaderboards
    Aggregate {
        /// Run directories, each holding one subdirectory per stage
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
        /// State file (defaults to $DUEL_RANKING_STATE or state.json)
        #[arg(short, long)]
        state: Option<PathBuf>,
        /// Directory for report files
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write CSV reports
        #[arg(long)]
        csv: bool,
        /// Skip HTML reports
        #[arg(long)]
        no_html: bool,
        /// Process everything but write neither reports nor state
        #[arg(long)]
        dry_run: bool,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
