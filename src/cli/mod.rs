//! CLI module for little-tsp.
//!
//! All CLI logic lives here rather than in main.rs so that it can be
//! tested. The entry point `run_cli` is called from main.rs with parsed
//! arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, SolveOptions};
pub use commands::{run_cli, run_solve, solve, SolveReport};
pub use output::{format_solve_report, print_help, print_solve_report, print_version, version_line};
