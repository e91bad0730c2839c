//! CLI output formatting.

use std::path::Path;

use crate::tsplib::TourFile;

use super::commands::SolveReport;

/// Print version information.
pub fn print_version() {
    println!("{}", version_line());
}

/// Version with the git revision when it was known at build time.
#[must_use]
pub fn version_line() -> String {
    match option_env!("GIT_HASH") {
        Some(hash) => format!("little-tsp {} ({hash})", env!("LITTLE_TSP_VERSION")),
        None => format!("little-tsp {}", env!("LITTLE_TSP_VERSION")),
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"little-tsp - exact TSP solver using Little's branch and bound

USAGE:
    little-tsp [solve] -i <problem.tsp> [OPTIONS]

OPTIONS:
    -i, --input <FILE>      TSPLIB problem with explicit edge weights
    -o, --output <FILE>     Write the tour in TSPLIB TOUR format
    -c, --config <FILE>     YAML solver configuration
        --max-nodes <N>     Stop after N search tree nodes
        --json              Print the result as JSON
    -v, --verbose           Log search progress (RUST_LOG overrides)

COMMANDS:
    solve                   Solve a problem (default)
    help                    Show this help message
    version                 Show version information

EXIT CODES:
    0   tour found
    1   invalid arguments, unreadable or malformed input
    2   the problem has no tour
    3   node budget spent before any tour was found

EXAMPLES:
    little-tsp -i br17.atsp
    little-tsp solve -i gr24.tsp -o gr24.tour --max-nodes 1000000
"
    );
}

/// Text shown for a finished run.
#[must_use]
pub fn format_solve_report(report: &SolveReport, written_to: Option<&Path>) -> String {
    let mut out = String::new();

    match &report.solution {
        Some(solution) => {
            let file = TourFile::new(&report.name, &solution.tour, solution.cost);
            match written_to {
                Some(path) => out.push_str(&format!("Tour written to {}\n", path.display())),
                None => out.push_str(&file.compact()),
            }
            out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
            out.push_str(&format!("Cost:       {}\n", solution.cost));
            let status = if solution.optimal {
                "✓ optimal"
            } else {
                "! best found within the node budget"
            };
            out.push_str(&format!("Status:     {status}\n"));
        }
        None => {
            out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
            let status = if report.stats.truncated {
                "✗ no tour found within the node budget"
            } else {
                "✗ infeasible"
            };
            out.push_str(&format!("Status:     {status}\n"));
        }
    }

    if let Some(bound) = report.root_bound {
        out.push_str(&format!("Root bound: {bound}\n"));
    }
    out.push_str(&format!(
        "Nodes:      {} ({} deferred, {} pruned, {} improvements)\n",
        report.stats.nodes,
        report.stats.branches_pushed,
        report.stats.branches_pruned,
        report.stats.improvements
    ));
    out
}

/// Print the text report of a run.
pub fn print_solve_report(report: &SolveReport, written_to: Option<&Path>) {
    print!("{}", format_solve_report(report, written_to));
}
