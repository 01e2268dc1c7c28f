//! Error taxonomy of the engine.
//!
//! - [`ConfigError`]: the class registration is unusable; the run never starts.
//! - [`EngineError`]: the run was aborted (a configuration error, a failing constructor or setup hook, or a broken snapshot).
//!
//! Per-test outcomes (failures, mismatches, errors) are never errors here; they are recorded in the
//! [`RunSummary`](crate::RunSummary).

use miette::Diagnostic;
use oopunit_core::{MemberKind, Role};
use thiserror::Error;

use crate::fault::Fault;

/// The registration table of a test class is invalid.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{class}` is not marked as a test class")]
    #[diagnostic(
        code(oopunit::config::missing_marker),
        help("call `.marked(OrderingMode::Ordered)` or `.marked(OrderingMode::Unordered)` on the descriptor")
    )]
    MissingTestClassMarker { class: String },

    #[error("`{class}` has no zero-argument constructor")]
    #[diagnostic(
        code(oopunit::config::missing_constructor),
        help("register one with `.constructor(...)` on the descriptor")
    )]
    MissingConstructor { class: String },

    #[error("`{class}::{member}` is a {found} but the `{role}` marker only applies to a {expected}")]
    #[diagnostic(code(oopunit::config::wrong_member_kind))]
    WrongMemberKind {
        class: String,
        member: String,
        role: Role,
        found: MemberKind,
        expected: MemberKind,
    },
}

/// The run was aborted before producing a summary.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("constructing `{class}` failed")]
    #[diagnostic(code(oopunit::engine::construction_failed))]
    ConstructionFailed {
        class: String,
        #[source]
        fault: Fault,
    },

    #[error("setup `{class}::{member}` failed")]
    #[diagnostic(
        code(oopunit::engine::setup_failed),
        help("setup hooks must not raise; the run was aborted before any test executed")
    )]
    SetupFailed {
        class: String,
        member: String,
        #[source]
        fault: Fault,
    },

    #[error("cannot back up or restore `{class}`: {reason}")]
    #[diagnostic(code(oopunit::engine::snapshot_unavailable))]
    SnapshotUnavailable { class: String, reason: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
