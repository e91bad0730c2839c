//! CLI argument parsing.
//!
//! Hand-written parser over any iterator of strings, so parsing can be
//! tested without a process environment.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Options of the `solve` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// TSPLIB problem file.
    pub input: PathBuf,
    /// Tour file to write; the tour is printed when absent.
    pub output: Option<PathBuf>,
    /// YAML configuration file.
    pub config: Option<PathBuf>,
    /// Node budget overriding the configuration.
    pub max_nodes: Option<usize>,
    /// Print the result as JSON.
    pub json: bool,
    /// Enable debug logging.
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Solve a TSPLIB problem
    Solve(SolveOptions),
    /// Show help
    Help,
    /// Show version
    Version,
    /// Unusable command line
    Invalid {
        /// What is wrong with it.
        message: String,
    },
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Whether debug logging was requested.
    #[must_use]
    pub fn verbose(&self) -> bool {
        matches!(&self.command, Command::Solve(options) if options.verbose)
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "solve" => Self::parse_solve_command(&args[2..]),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            flag if flag.starts_with('-') => Self::parse_solve_command(&args[1..]),
            unknown => Command::Invalid {
                message: format!("unknown command '{unknown}'"),
            },
        };

        Self { command }
    }

    /// Parse the options of `solve`.
    fn parse_solve_command(args: &[String]) -> Command {
        let mut options = SolveOptions::default();
        let mut input = None;

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let needs_value = matches!(
                flag,
                "-i" | "--input" | "-o" | "--output" | "-c" | "--config" | "--max-nodes"
            );
            let value = if needs_value {
                match args.get(i + 1) {
                    Some(v) => Some(v.as_str()),
                    None => {
                        return Command::Invalid {
                            message: format!("'{flag}' requires a value"),
                        }
                    }
                }
            } else {
                None
            };

            match (flag, value) {
                ("-i" | "--input", Some(v)) => input = Some(PathBuf::from(v)),
                ("-o" | "--output", Some(v)) => options.output = Some(PathBuf::from(v)),
                ("-c" | "--config", Some(v)) => options.config = Some(PathBuf::from(v)),
                ("--max-nodes", Some(v)) => match v.parse() {
                    Ok(n) => options.max_nodes = Some(n),
                    Err(_) => {
                        return Command::Invalid {
                            message: format!("'--max-nodes' expects a number, got '{v}'"),
                        }
                    }
                },
                ("--json", None) => options.json = true,
                ("-v" | "--verbose", None) => options.verbose = true,
                _ => {
                    return Command::Invalid {
                        message: format!("unknown option '{flag}'"),
                    }
                }
            }
            i += if needs_value { 2 } else { 1 };
        }

        match input {
            Some(path) => {
                options.input = path;
                Command::Solve(options)
            }
            None => Command::Invalid {
                message: "an input file is required (-i <problem.tsp>)".to_string(),
            },
        }
    }
}
