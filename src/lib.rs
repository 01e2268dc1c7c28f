#![forbid(unsafe_code)]
//! OOPUnit: a small lifecycle-driven unit-test engine.
//!
//! A test class registers its members once through a [`ClassDescriptor`]. The engine catalogs them across the
//! inheritance chain, selects tests by tag and order, and drives each one through
//! backup, expectation reset, before hooks, body, classification, and reversed after hooks. Non-success
//! outcomes restore the subject from its backup.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Test subjects**: panics escaping a hook, a body, or a constructor are caught and turned into a
//!   [`faults::PANIC`] fault; they never unwind through the engine.

extern crate self as oopunit;

pub mod assertions;
pub mod class;
pub mod cli;
pub mod engine;
pub mod expectation;
pub mod fault;
pub mod outcome;
pub mod snapshot;

pub use oopunit_core::faults;
pub use oopunit_core::{FaultKind, OrderingMode, OutcomeKind, Role};

pub use assertions::{assert_equals, assert_true, fail};
pub use class::{ClassDescriptor, MemberDecl, RoleMarker, TestClass, TypeLevel, Visibility};
pub use engine::{ConfigError, EngineError, EngineResult, Executor, run_all, run_all_tagged, run_descriptor};
pub use expectation::ExpectedException;
pub use fault::{Fault, Raises};
pub use outcome::{RunSummary, TestResult};
pub use snapshot::{Duplicate, SharedHandle, Snapshot};
