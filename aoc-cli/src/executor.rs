//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single part
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    pub solve_duration: TimeDelta,
    pub parse_duration: Option<TimeDelta>,
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    context: RunContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker needs; shared by reference across the pool
struct RunContext {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: RunContext {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.context.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.context;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Clip `1..=max_parts` to the part filter; empty when the filter is out of range
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.context.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        info!(
            "scheduling {} day(s) by {:?} on {} thread(s)",
            work_items.len(),
            self.context.parallelize_by,
            self.thread_pool.current_num_threads()
        );

        match self.context.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work(&work, &tx, &self.context) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();
                self.execute_parallel(by_year, &tx)
            }
            // Part-level parallelism happens inside `run_work`
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singles = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel(singles, &tx)
            }
        }
    }

    /// Run groups in parallel, each group's items in order
    fn execute_parallel(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let context = &self.context;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work(&work, tx, context) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
                    (a, b) => a.or(b),
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Report the same failure for every requested part
fn send_failures(
    work: &WorkItem,
    error: ArcExecutorError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(
            tx,
            SolverResult {
                year: work.year,
                day: work.day,
                part,
                answer: Err(error.clone()),
                solve_duration: TimeDelta::zero(),
                parse_duration: None,
            },
        )?;
    }
    Ok(())
}

/// Load the input and solve every part of one work item.
///
/// Input, parse and solve failures are reported as results; only a closed
/// channel is an error here.
fn run_work(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    context: &RunContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let input = match context.inputs.read(year, day) {
        Ok(input) => input,
        Err(source) => {
            warn!("{year}/{day:02}: {source}");
            return send_failures(work, ExecutorError::Input { year, day, source }.into(), tx);
        }
    };
    debug!("{year}/{day:02}: solving parts {:?}", work.parts);

    if context.parallelize_by == ParallelizeBy::Part {
        run_parts_parallel(work, &input, tx, context)
    } else {
        run_parts_sequential(work, &input, tx, context)
    }
}

/// Parse once and solve the parts in order, sharing the parsed data.
///
/// The single parse is reported on the first part only.
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    context: &RunContext,
) -> Result<(), ArcExecutorError> {
    let mut solver = match context.registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => return send_failures(work, ExecutorError::Solver(e).into(), tx),
    };
    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        let result = solve_part(work.year, work.day, part, &mut *solver, parse_duration.take());
        send(tx, result)?;
    }
    Ok(())
}

/// Parse separately for each part and solve them concurrently
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    context: &RunContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match context.registry.create_solver(year, day, input) {
            Ok(mut solver) => {
                let parse_duration = Some(solver.parse_duration());
                solve_part(year, day, part, &mut *solver, parse_duration)
            }
            Err(e) => SolverResult {
                year,
                day,
                part,
                answer: Err(ExecutorError::Solver(e).into()),
                solve_duration: TimeDelta::zero(),
                parse_duration: None,
            },
        })
        .collect();
    // Collected in part order
    for result in results {
        send(tx, result)?;
    }
    Ok(())
}

fn solve_part(
    year: u16,
    day: u8,
    part: u8,
    solver: &mut dyn DynSolver,
    parse_duration: Option<TimeDelta>,
) -> SolverResult {
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(solved) => {
            let duration = solved.duration();
            (Ok(solved.answer), duration)
        }
        Err(e) => (
            Err(ExecutorError::Solver(e.into()).into()),
            TimeDelta::zero(),
        ),
    };
    SolverResult {
        year,
        day,
        part,
        answer,
        solve_duration,
        parse_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::SolverRegistryBuilder;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn executor(dir: &TempDir, extra: &[&str]) -> Executor {
        let mut argv = vec!["aoc", "--threads", "2", "-i"];
        let dir = dir.path().to_str().unwrap();
        argv.push(dir);
        argv.extend_from_slice(extra);
        let config = Config::from_args(Args::try_parse_from(argv).unwrap());
        let registry = SolverRegistryBuilder::new()
            .register_all_plugins()
            .unwrap()
            .build();
        Executor::new(registry, &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    fn write_input(dir: &TempDir, year: u16, day: u8, input: &str) {
        let year_dir = dir.path().join(year.to_string());
        fs::create_dir_all(&year_dir).unwrap();
        fs::write(year_dir.join(format!("day{day:02}.txt")), input).unwrap();
    }

    #[test]
    fn filters_select_work_items() {
        let dir = TempDir::new().unwrap();
        let items = executor(&dir, &["-y", "2016", "-p", "2"]).collect_work_items();
        assert!(items.iter().all(|w| w.year == 2016 && w.parts == (2..=2)));
        // The last day of 2016 has no second part
        assert!(!items.iter().any(|w| w.day == 25));

        let items = executor(&dir, &["-y", "2017", "-d", "3"]).collect_work_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].parts, 1..=2);
    }

    #[test]
    fn solves_available_input_and_reports_missing_ones() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 2017, 1, "1122\n");
        for mode in ["sequential", "part"] {
            let results = run(&executor(&dir, &["-y", "2017", "-d", "1", "--parallelize-by", mode]));
            let answers: Vec<_> = results.iter().map(|r| r.answer.as_ref().unwrap().as_str()).collect();
            assert_eq!(answers, vec!["3", "0"]);
        }

        let results = run(&executor(&dir, &["-y", "2017", "-d", "3"]));
        assert_eq!(results.len(), 2);
        for result in &results {
            let err = result.answer.as_ref().unwrap_err();
            assert!(matches!(err.inner(), ExecutorError::Input { .. }));
        }
    }

    #[test]
    fn shared_parse_is_reported_once_per_day() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 2017, 1, "1122\n");
        for (mode, parses) in [("sequential", 1), ("year", 1), ("day", 1), ("part", 2)] {
            let results = run(&executor(&dir, &["-y", "2017", "-d", "1", "--parallelize-by", mode]));
            assert_eq!(results.len(), 2);
            let reported: Vec<_> = results.iter().map(|r| r.parse_duration.is_some()).collect();
            assert_eq!(reported.iter().filter(|&&p| p).count(), parses, "mode {mode}");
            assert!(reported[0], "part 1 carries the parse in mode {mode}");
        }
    }

    #[test]
    fn malformed_input_fails_only_that_day() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 2025, 1, "R5\nU3\n");
        write_input(&dir, 2025, 5, "3-5\n\n4\n");
        let results = run(&executor(&dir, &["-y", "2025", "--parallelize-by", "year"]));
        assert!(results.iter().filter(|r| r.day == 1).all(|r| r.answer.is_err()));
        let day5: Vec<_> = results
            .iter()
            .filter(|r| r.day == 5)
            .map(|r| r.answer.as_ref().unwrap().clone())
            .collect();
        assert_eq!(day5, vec!["1", "3"]);
    }
}
