//! `aoc` - runs archived Advent of Code solutions on local inputs

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Linking the archive registers its solver plugins
use aoc_puzzles as _;

use aoc_solver::{SolverPlugin, SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, WorkItem};
use itertools::Itertools;
use log::{info, warn};
use output::OutputFormatter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args);
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config).map_err(error::ArcExecutorError::from)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }
    if config.list {
        print_listing(&work_items);
        return Ok(());
    }

    let missing = work_items
        .iter()
        .filter(|w| !executor.inputs().contains(w.year, w.day))
        .count();
    if missing > 0 {
        warn!(
            "{missing} of {} selected day(s) have no input under {}",
            work_items.len(),
            config.input_dir.display()
        );
    }

    run_executor(executor, &work_items, config.quiet)
}

fn print_listing(work_items: &[WorkItem]) {
    for line in listing_lines(work_items) {
        println!("{line}");
    }
}

/// One line per day: `YYYY/DD  parts  tags`
fn listing_lines(work_items: &[WorkItem]) -> Vec<String> {
    work_items
        .iter()
        .map(|work| {
            let tags = plugin_tags(work.year, work.day).join(", ");
            let parts = work.parts.clone().map(|p| p.to_string()).join(",");
            format!("{}/{:02}  parts {parts}  [{tags}]", work.year, work.day)
        })
        .collect()
}

fn plugin_tags(year: u16, day: u8) -> &'static [&'static str] {
    aoc_solver::inventory::iter::<SolverPlugin>
        .into_iter()
        .find(|plugin| plugin.year == year && plugin.day == day)
        .map(|plugin| plugin.tags)
        .unwrap_or_default()
}

/// Run the executor on a background thread, printing results in order as
/// they become due
fn run_executor(executor: Executor, work_items: &[WorkItem], quiet: bool) -> Result<(), CliError> {
    info!("running {} solver(s)", work_items.len());

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |p| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part: p,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::ExecutorPanicked)??;

    formatter.print_summary(&results);
    Ok(())
}

/// Registry of every linked day carrying all of `tags`
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
