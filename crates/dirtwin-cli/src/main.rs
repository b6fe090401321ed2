mod commands;
mod logging;
mod progress;

use std::io;
use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, ScanArgs};
use dirtwin_core::session::{self, CommandSource, DecisionJournal};
use dirtwin_core::{report, AppConfig, ScanEngine, ScanOutcome, ScanSettings};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match dirtwin_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Scan(scan_args)) => {
            if let Err(err) = run_scan(&config, &scan_args) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Review(scan_args)) => {
            if let Err(err) = run_review(&config, &scan_args) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn build_settings(args: &ScanArgs) -> Result<ScanSettings, Box<dyn std::error::Error>> {
    let min_size = args.min_size.as_deref().map(commands::parse_size).transpose()?;
    let max_size = args.max_size.as_deref().map(commands::parse_size).transpose()?;
    Ok(ScanSettings {
        max_depth: args.max_depth,
        min_size,
        max_size,
        min_files: args.min_files,
        min_similarity: args.min_similarity,
        sort_key: args.sort,
    })
}

fn run_pipeline(
    config: &AppConfig,
    args: &ScanArgs,
) -> Result<ScanOutcome, Box<dyn std::error::Error>> {
    let roots = if args.paths.is_empty() {
        config.root_paths.clone()
    } else {
        args.paths.clone()
    };
    if roots.is_empty() {
        return Err("no paths given and Config.toml has no root_paths".into());
    }

    let settings = build_settings(args)?;
    let engine = ScanEngine::new(roots, config.ignore_patterns.clone(), settings);
    let reporter = CliReporter::new();
    let outcome = engine.scan(&reporter)?;

    println!();
    info!(
        "Indexed {} folders, compared {}, {} matching pairs",
        format!("{}", outcome.dirs_indexed).green(),
        outcome.dirs_compared,
        format!("{}", outcome.results.len()).green(),
    );
    info!(
        "Index: {}, Compare: {}",
        format!("{:.2}s", outcome.index_duration.as_secs_f64()).green(),
        format!("{:.2}s", outcome.compare_duration.as_secs_f64()).green(),
    );
    if !outcome.warnings.is_empty() {
        info!(
            "{} subtrees were skipped (raise TRACING_LEVEL=debug for details)",
            format!("{}", outcome.warnings.len()).yellow(),
        );
    }

    Ok(outcome)
}

fn run_scan(config: &AppConfig, args: &ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = run_pipeline(config, args)?;

    if let Some(path) = &args.output {
        report::write_csv(&outcome.results, path)?;
        println!("Results saved to: {}", path.display());
    } else if outcome.results.len() < 200 || args.print {
        print_results(&outcome);
    } else {
        println!("Too many results to print to stdout.");
        println!("Use `-p` to force print it if wanted");
        let path = report::default_csv_path();
        report::write_csv(&outcome.results, &path)?;
        println!("Results saved to: {}", path.display());
    }

    Ok(())
}

fn print_results(outcome: &ScanOutcome) {
    for entry in &outcome.results {
        println!(
            "Similarity: {}%, Total Size: {}",
            report::percent(entry.similarity).cyan(),
            report::human_size(entry.combined_size),
        );
        println!("  Folder 1: {}", entry.folder_a.path.display());
        println!("  Folder 2: {}", entry.folder_b.path.display());
        println!();
    }
}

fn run_review(config: &AppConfig, args: &ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = run_pipeline(config, args)?;

    if outcome.results.is_empty() {
        info!("No pairs at or above the similarity threshold; nothing to review");
        return Ok(());
    }

    let journal_path = args
        .journal
        .clone()
        .unwrap_or_else(DecisionJournal::default_path);
    let mut journal = DecisionJournal::new(journal_path);
    let mut source = ConsoleSource;
    let mut out = io::stdout();

    let summary = session::run_session(&outcome.results, &mut source, &mut out, &mut journal)?;

    println!();
    info!(
        "Reviewed {} of {} pairs: {} delete requests, {} merge intents, {} skipped",
        summary.pairs_presented,
        outcome.results.len(),
        format!("{}", summary.deletions).red(),
        summary.merges,
        summary.skips,
    );
    if summary.deletions + summary.merges > 0 {
        info!("Decisions recorded in {}", journal.path().display());
    }

    Ok(())
}

/// Blocking stdin line source for the review session.
struct ConsoleSource;

impl CommandSource for ConsoleSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut input = String::new();
        let read = io::stdin().read_line(&mut input)?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(input))
        }
    }
}
