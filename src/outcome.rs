//! Per-test results and the run summary.

use std::collections::HashMap;
use std::fmt;

use oopunit_core::OutcomeKind;

/// The classified outcome of one test cycle. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    kind: OutcomeKind,
    message: Option<String>,
}

impl TestResult {
    pub fn new(kind: OutcomeKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    pub fn success() -> Self {
        Self::new(OutcomeKind::Success, None)
    }

    pub fn failure(message: Option<&str>) -> Self {
        Self::new(OutcomeKind::Failure, message.map(str::to_string))
    }

    pub fn mismatch(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::ExpectedExceptionMismatch, Some(message.into()))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Error, Some(message.into()))
    }

    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.kind, message),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Test name to result, plus the order in which tests were first recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    results: HashMap<String, TestResult>,
    order: Vec<String>,
}

impl RunSummary {
    /// Record `result` under `name`, replacing any earlier result for the same name.
    pub fn record(&mut self, name: impl Into<String>, result: TestResult) {
        let name = name.into();
        if self.results.insert(name.clone(), result).is_none() {
            self.order.push(name);
        }
    }

    pub fn result(&self, name: &str) -> Option<&TestResult> {
        self.results.get(name)
    }

    /// Results in the order tests were executed.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestResult)> {
        self.order
            .iter()
            .filter_map(|name| self.results.get(name).map(|result| (name.as_str(), result)))
    }

    /// Names of the executed tests, in execution order.
    pub fn executed(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.results.values().filter(|result| result.kind == kind).count()
    }

    pub fn num_successes(&self) -> usize {
        self.count(OutcomeKind::Success)
    }

    pub fn num_failures(&self) -> usize {
        self.count(OutcomeKind::Failure)
    }

    pub fn num_exception_mismatches(&self) -> usize {
        self.count(OutcomeKind::ExpectedExceptionMismatch)
    }

    pub fn num_errors(&self) -> usize {
        self.count(OutcomeKind::Error)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether every recorded test succeeded. Vacuously true for an empty run.
    pub fn all_succeeded(&self) -> bool {
        self.len() == self.num_successes()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tests: {} succeeded, {} failed, {} mismatched, {} errored",
            self.len(),
            self.num_successes(),
            self.num_failures(),
            self.num_exception_mismatches(),
            self.num_errors()
        )
    }
}
