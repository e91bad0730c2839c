//! CLI command handlers.
//!
//! This module contains the execution logic for each CLI command.

use std::process::ExitCode;

use serde::Serialize;

use crate::config::LittleConfig;
use crate::error::{TspError, TspResult};
use crate::little::{LittleSolver, SearchStats, Solution};
use crate::tsplib::{TourFile, TsplibProblem};

use super::output::{print_help, print_solve_report, print_version};
use super::{Args, Command, SolveOptions};

/// Exit code for an instance without any tour.
const EXIT_INFEASIBLE: u8 = 2;

/// Exit code for a search stopped by the node budget before any tour.
const EXIT_TRUNCATED: u8 = 3;

/// Everything a `solve` run found out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    /// Problem `NAME`.
    pub name: String,
    /// Number of cities.
    pub dimension: usize,
    /// Bound of the root reduction.
    pub root_bound: Option<i64>,
    /// Best tour, if any.
    pub solution: Option<Solution<i64>>,
    /// Search counters.
    pub stats: SearchStats,
}

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Solve(options) => run_solve(&options),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
        Command::Invalid { message } => {
            eprintln!("Error: {message}\n");
            print_help();
            ExitCode::from(1)
        }
    }
}

/// Solve a problem, then print or write the tour.
#[must_use]
pub fn run_solve(options: &SolveOptions) -> ExitCode {
    let report = match solve(options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = emit(options, &report) {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    if report.solution.is_some() {
        ExitCode::SUCCESS
    } else if report.stats.truncated {
        eprintln!(
            "No tour found within the node budget for {}",
            options.input.display()
        );
        ExitCode::from(EXIT_TRUNCATED)
    } else {
        eprintln!("No feasible tour exists for {}", options.input.display());
        ExitCode::from(EXIT_INFEASIBLE)
    }
}

/// Load settings and the problem, then run the solver.
///
/// # Errors
///
/// Returns error if the configuration or problem cannot be read, or the
/// problem is not a valid instance.
pub fn solve(options: &SolveOptions) -> TspResult<SolveReport> {
    let mut config = match &options.config {
        Some(path) => LittleConfig::load(path)?,
        None => LittleConfig::default(),
    };
    if let Some(max_nodes) = options.max_nodes {
        if max_nodes < 2 {
            return Err(TspError::config(
                "--max-nodes must allow at least the root and one child",
            ));
        }
        config.solver.max_nodes = Some(max_nodes);
    }

    let problem = TsplibProblem::from_file(&options.input)?;
    let matrix = problem.to_matrix(config.tsplib.no_edge)?;
    let mut solver = LittleSolver::with_config(matrix, config.solver)?;
    solver.find_tour()?;

    Ok(SolveReport {
        name: problem.name,
        dimension: problem.dimension,
        root_bound: solver.root_bound(),
        solution: solver.solution(),
        stats: solver.stats(),
    })
}

/// Write the tour file and print the report in the requested form.
fn emit(options: &SolveOptions, report: &SolveReport) -> TspResult<()> {
    if let (Some(path), Some(solution)) = (&options.output, &report.solution) {
        TourFile::new(&report.name, &solution.tour, solution.cost).save(path)?;
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_solve_report(report, options.output.as_deref());
    }
    Ok(())
}
