//! little-tsp CLI - exact TSP solver
//!
//! Reads a TSPLIB problem, runs Little's branch and bound and prints or
//! writes the tour.

use std::process::ExitCode;

use little_tsp::cli::{run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose() { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    run_cli(args)
}
