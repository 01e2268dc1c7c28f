//! CLI module for the OOPUnit engine
//!
//! ## Commands
//!
//! - `list` - List the bundled demo suites
//! - `run <SUITE>` - Run one bundled suite, optionally filtered by tag
//!
//! ## Modules
//!
//! - `reporter` - Console rendering of a run summary
//! - `suites` - The bundled demo suites
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod reporter;
pub mod suites;

use std::fmt;
use std::io::{self, IsTerminal};
use std::process;

use clap::{Parser, Subcommand};

use crate::engine::EngineError;
use reporter::ConsoleReporter;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    /// Every selected test succeeded.
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one test did not succeed.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The run could not start or was aborted.
    pub const FATAL: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a fatal error (exit code 2).
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FATAL)
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        CliError::fatal(format!("{:?}", miette::Report::new(err)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Lifecycle-driven unit-test engine
#[derive(Parser, Debug)]
#[command(name = "oopunit")]
#[command(version = VERSION)]
#[command(about = "Run OOPUnit test classes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the bundled demo suites
    List,

    /// Run a bundled demo suite
    Run {
        /// Suite name (see `oopunit list`)
        #[arg(value_name = "SUITE")]
        suite: String,
        /// Only run tests carrying exactly this tag (default: all tests)
        #[arg(short, long, value_name = "TAG", default_value = "")]
        tag: String,
        /// One line per test instead of a dot line
        #[arg(short, long)]
        verbose: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != ExitCode::SUCCESS {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::List => {
            print!("{}", list_suites());
            Ok(ExitCode::SUCCESS)
        }
        Command::Run { suite, tag, verbose } => {
            let reporter = ConsoleReporter::new(verbose).with_color(io::stderr().is_terminal());
            run_suite(&suite, &tag, &reporter)
        }
    }
}

fn list_suites() -> String {
    let width = suites::SUITES.iter().map(|suite| suite.name.len()).max().unwrap_or(0);
    suites::SUITES
        .iter()
        .map(|suite| format!("{:width$}  {}\n", suite.name, suite.description))
        .collect()
}

/// Run one bundled suite and report it on stderr.
fn run_suite(name: &str, tag: &str, reporter: &ConsoleReporter) -> CliResult<ExitCode> {
    let suite = suites::find(name).ok_or_else(|| {
        CliError::fatal(format!("unknown suite `{name}`; run `oopunit list` to see the bundled suites"))
    })?;
    let summary = suite.run(tag)?;
    eprint!("{}", reporter.render(suite.name, &summary));
    Ok(if summary.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::try_parse_from(["oopunit", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn test_cli_parse_run_defaults() {
        let cli = Cli::try_parse_from(["oopunit", "run", "ordered"]).unwrap();
        if let Command::Run { suite, tag, verbose } = cli.command {
            assert_eq!(suite, "ordered");
            assert_eq!(tag, "");
            assert!(!verbose);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_run_with_tag() {
        let cli = Cli::try_parse_from(["oopunit", "run", "ordered", "-t", "mutating", "-v"]).unwrap();
        if let Command::Run { tag, verbose, .. } = cli.command {
            assert_eq!(tag, "mutating");
            assert!(verbose);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["oopunit"]).is_err());
    }

    #[test]
    fn test_list_names_every_suite() {
        let listing = list_suites();
        for suite in suites::SUITES {
            assert!(listing.contains(suite.name), "{} missing from listing", suite.name);
        }
    }

    #[test]
    fn test_exit_codes_follow_the_summary() {
        let reporter = ConsoleReporter::new(false);
        assert_eq!(run_suite("inheritance", "", &reporter).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run_suite("hooks", "", &reporter).unwrap(), ExitCode::FAILURE);

        let err = run_suite("nope", "", &reporter).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FATAL);
        assert!(err.message.contains("unknown suite `nope`"));
    }
}
