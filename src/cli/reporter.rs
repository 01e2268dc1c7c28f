//! Console rendering of a run.
//!
//! Compact mode prints one character per test (`.` success, `F` failure, `M` mismatch, `E` error) followed by
//! the details of every non-success. Verbose mode prints one line per test. Both end with the summary line.

use std::fmt::Write as _;

use oopunit_core::OutcomeKind;

use crate::outcome::{RunSummary, TestResult};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Default console reporter.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
    pub color: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose, color: false }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Render a finished run of `suite`, tests in execution order.
    pub fn render(&self, suite: &str, summary: &RunSummary) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{suite}");

        if summary.is_empty() {
            let _ = writeln!(out, "No tests selected");
        } else if self.verbose {
            for (name, result) in summary.iter() {
                let _ = match result.message() {
                    Some(message) => writeln!(out, "{name} ... {} ({message})", self.status(result)),
                    None => writeln!(out, "{name} ... {}", self.status(result)),
                };
            }
        } else {
            let dots: String = summary.iter().map(|(_, result)| self.dot(result)).collect();
            let _ = writeln!(out, "{dots}");
            for (name, result) in summary.iter().filter(|(_, result)| !result.kind().is_success()) {
                let _ = writeln!(out, "\n{}", self.paint(RED, name));
                let _ = writeln!(out, "  {}", self.status(result));
                if let Some(message) = result.message() {
                    let _ = writeln!(out, "  {message}");
                }
            }
        }

        let color = if summary.all_succeeded() { GREEN } else { RED };
        let _ = writeln!(out, "\n====== {} ======", self.paint(color, &summary.to_string()));
        out
    }

    fn status(&self, result: &TestResult) -> String {
        self.paint(color_of(result.kind()), &result.kind().to_string())
    }

    fn dot(&self, result: &TestResult) -> String {
        let symbol = match result.kind() {
            OutcomeKind::Success => ".",
            OutcomeKind::Failure => "F",
            OutcomeKind::ExpectedExceptionMismatch => "M",
            OutcomeKind::Error => "E",
        };
        self.paint(color_of(result.kind()), symbol)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn color_of(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::Success => GREEN,
        OutcomeKind::ExpectedExceptionMismatch => YELLOW,
        OutcomeKind::Failure | OutcomeKind::Error => RED,
    }
}
