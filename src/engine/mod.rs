//! The test engine: catalog, selection, and the per-test lifecycle.
//!
//! ```text
//! ClassDescriptor -> catalog::discover -> selection::selection_for -> Executor::run -> RunSummary
//! ```

pub mod catalog;
pub mod errors;
pub mod executor;
pub mod selection;

use crate::class::{ClassDescriptor, TestClass};
use crate::outcome::RunSummary;
use crate::snapshot::Snapshot;

pub use errors::{ConfigError, EngineError, EngineResult};
pub use executor::Executor;

/// Run every test of `T`.
///
/// ## Errors
/// See [`Executor::new`] and [`Executor::run`].
pub fn run_all<T: TestClass>() -> EngineResult<RunSummary> {
    run_all_tagged::<T>("")
}

/// Run the tests of `T` whose tag equals `tag`. The empty tag selects everything.
pub fn run_all_tagged<T: TestClass>(tag: &str) -> EngineResult<RunSummary> {
    run_descriptor(&T::descriptor(), tag)
}

/// Run a descriptor that is not tied to a [`TestClass`] impl.
pub fn run_descriptor<T: Snapshot>(descriptor: &ClassDescriptor<T>, tag: &str) -> EngineResult<RunSummary> {
    Executor::new(descriptor)?.run(tag)
}
