use anyhow::Result;
use colored::Colorize;

use duel_ranking::cli::Command;
use duel_ranking::{handle_aggregate, handle_completions, interpret, AggregateOptions};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Aggregate {
            dirs,
            state,
            output,
            csv,
            no_html,
            dry_run,
        } => handle_aggregate(AggregateOptions {
            dirs,
            state,
            output,
            csv,
            no_html,
            dry_run,
        }),
        Command::Completions { shell } => handle_completions(shell),
    }
}
