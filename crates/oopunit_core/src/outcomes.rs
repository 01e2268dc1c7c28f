//! Per-test outcome kinds.

use crate::registry::{self, VocabInfo, row};

/// The classification of one test cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    Failure,
    ExpectedExceptionMismatch,
    Error,
}

/// Registry of outcome kinds, in report order.
pub const OUTCOMES: &[VocabInfo<OutcomeKind>] = &[
    row(
        OutcomeKind::Success,
        "SUCCESS",
        &[],
        "The body returned normally, or raised the expected fault.",
    ),
    row(
        OutcomeKind::Failure,
        "FAILURE",
        &[],
        "The body raised the assertion-failure signal.",
    ),
    row(
        OutcomeKind::ExpectedExceptionMismatch,
        "EXPECTED_EXCEPTION_MISMATCH",
        &["MISMATCH"],
        "A fault was expected, but the raised one had the wrong kind or message.",
    ),
    row(
        OutcomeKind::Error,
        "ERROR",
        &[],
        "An unexpected fault, a missing expected fault, or a failing hook.",
    ),
];

/// All outcome kinds in report order.
pub const ALL: [OutcomeKind; 4] = [
    OutcomeKind::Success,
    OutcomeKind::Failure,
    OutcomeKind::ExpectedExceptionMismatch,
    OutcomeKind::Error,
];

/// Return the canonical spelling for an outcome kind (e.g. `"SUCCESS"`).
pub fn as_str(kind: OutcomeKind) -> &'static str {
    registry::find(OUTCOMES, kind).map_or("<unregistered outcome>", |info| info.canonical)
}

/// Resolve a spelling to an outcome kind.
pub fn from_str(spelling: &str) -> Option<OutcomeKind> {
    registry::resolve(OUTCOMES, spelling)
}

impl OutcomeKind {
    /// Whether this outcome counts as passing.
    pub const fn is_success(self) -> bool {
        matches!(self, OutcomeKind::Success)
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}
