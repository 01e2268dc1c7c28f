//! The lifecycle executor.
//!
//! One run: validate the marker, build the catalog and selection, construct the subject, run every setup hook
//! once, then drive each selected test through its cycle:
//!
//! ```text
//! backup -> reset expectation -> before hooks -> body -> classify -> after hooks (reversed) -> record
//!               |                    |                                   |
//!               |                    +-- raises: ERROR, restore, record  +-- raises: ERROR (overrides), restore
//! ```
//!
//! Every hook and body runs on this thread, one after another, against the single subject instance.

use std::panic::{self, AssertUnwindSafe};

use oopunit_core::{OutcomeKind, Role};
use tracing::{debug, info, warn};

use crate::class::{ClassDescriptor, RuleAccessor};
use crate::expectation::ExpectedException;
use crate::fault::{Fault, Raises};
use crate::outcome::{RunSummary, TestResult};
use crate::snapshot::{Backup, Snapshot, SnapshotService};

use super::catalog::{self, CatalogEntry, RoleCatalog};
use super::errors::{ConfigError, EngineError, EngineResult};
use super::selection;

/// Runs the tests of one class. A fresh subject is built for every [`Executor::run`].
pub struct Executor<'d, T> {
    descriptor: &'d ClassDescriptor<T>,
    catalog: RoleCatalog<'d, T>,
    snapshots: SnapshotService<'d, T>,
}

impl<'d, T: Snapshot> Executor<'d, T> {
    /// Validate the class and build its catalog.
    ///
    /// ## Errors
    /// - [`ConfigError::MissingTestClassMarker`] or [`ConfigError::WrongMemberKind`].
    pub fn new(descriptor: &'d ClassDescriptor<T>) -> Result<Self, ConfigError> {
        if descriptor.marker.is_none() {
            return Err(ConfigError::MissingTestClassMarker {
                class: descriptor.name.clone(),
            });
        }
        let catalog = catalog::discover(descriptor)?;
        Ok(Self {
            descriptor,
            catalog,
            snapshots: SnapshotService::new(&descriptor.name, descriptor.constructor),
        })
    }

    pub fn catalog(&self) -> &RoleCatalog<'d, T> {
        &self.catalog
    }

    /// Run every test selected by `tag` and summarise the outcomes.
    ///
    /// ## Errors
    /// - [`EngineError::Config`] if the class has no constructor.
    /// - [`EngineError::ConstructionFailed`] or [`EngineError::SetupFailed`] if the subject cannot be prepared.
    /// - [`EngineError::SnapshotUnavailable`] if a backup cannot be taken or restored.
    #[tracing::instrument(skip_all, fields(class = %self.descriptor.name, tag = tag))]
    pub fn run(&self, tag: &str) -> EngineResult<RunSummary> {
        let selection = selection::selection_for(self.descriptor, &self.catalog, tag)?;
        let mut subject = self.construct()?;

        for setup in self.catalog.members(Role::Setup) {
            invoke(setup, &mut subject).map_err(|fault| EngineError::SetupFailed {
                class: self.descriptor.name.clone(),
                member: setup.name.to_string(),
                fault,
            })?;
        }

        let mut summary = RunSummary::default();
        for test in selection {
            let result = self.run_cycle(&mut subject, test)?;
            debug!(test = test.name, outcome = %result.kind(), "test classified");
            summary.record(test.name, result);
        }
        info!(%summary, "run finished");
        Ok(summary)
    }

    fn construct(&self) -> EngineResult<T> {
        let constructor = self
            .descriptor
            .constructor
            .ok_or_else(|| ConfigError::MissingConstructor {
                class: self.descriptor.name.clone(),
            })?;
        panic::catch_unwind(AssertUnwindSafe(constructor)).map_err(|payload| EngineError::ConstructionFailed {
            class: self.descriptor.name.clone(),
            fault: Fault::from_panic(payload),
        })
    }

    /// One full cycle for `test`. Only engine failures escape; every per-test outcome is returned.
    fn run_cycle(&self, subject: &mut T, test: &CatalogEntry<'d, T>) -> EngineResult<TestResult> {
        let _span = tracing::debug_span!("test", name = test.name).entered();

        let backup = self.snapshots.backup(subject)?;
        let rule = self.catalog.exception_rule();
        if let Some(rule) = rule {
            rule(subject).reset();
        }

        for hook in self.hooks(Role::Before, test) {
            if let Err(fault) = invoke(hook, subject) {
                warn!(hook = hook.name, %fault, "before hook raised; skipping test body");
                self.snapshots.restore(subject, &backup)?;
                return Ok(TestResult::error(fault.to_string()));
            }
        }

        let mut result = self.invoke_and_classify(subject, test, rule, &backup)?;

        for hook in self.hooks(Role::After, test).into_iter().rev() {
            if let Err(fault) = invoke(hook, subject) {
                warn!(hook = hook.name, %fault, "after hook raised; overriding outcome");
                result = TestResult::error(fault.to_string());
                self.snapshots.restore(subject, &backup)?;
                break;
            }
        }
        Ok(result)
    }

    fn invoke_and_classify(
        &self,
        subject: &mut T,
        test: &CatalogEntry<'d, T>,
        rule: Option<RuleAccessor<T>>,
        backup: &Backup<T>,
    ) -> EngineResult<TestResult> {
        let raised = invoke(test, subject);
        let result = match rule {
            Some(accessor) => classify(raised, Some(accessor(subject))),
            None => classify(raised, None),
        };
        // Expected faults keep the state the test produced; everything else is rolled back.
        if result.kind() != OutcomeKind::Success {
            self.snapshots.restore(subject, backup)?;
        }
        Ok(result)
    }

    /// Hooks of `role` that list `test` and are declared at or above the test's declaring level, in catalog
    /// order.
    fn hooks(&self, role: Role, test: &CatalogEntry<'d, T>) -> Vec<&CatalogEntry<'d, T>> {
        self.catalog
            .members(role)
            .iter()
            .filter(|hook| hook.level <= test.level && hook.applies_to(test.name))
            .collect()
    }
}

/// Classify the outcome of a test body against the subject's expectation, if it has one.
fn classify(raised: Raises, rule: Option<&mut ExpectedException>) -> TestResult {
    let expected = rule.as_ref().and_then(|rule| rule.expected_exception());
    match raised {
        Ok(()) => match expected {
            Some(kind) => TestResult::error(format!("expected {kind} to be raised, but the test returned normally")),
            None => TestResult::success(),
        },
        Err(fault) if fault.is_assertion_failure() => TestResult::failure(fault.message()),
        Err(fault) => match (expected, rule) {
            (Some(kind), Some(rule)) => {
                if rule.assert_expected(&fault) {
                    TestResult::success()
                } else {
                    TestResult::mismatch(format!("expected {kind} but {fault} was raised"))
                }
            }
            _ => TestResult::error(fault.kind().name()),
        },
    }
}

/// Call a hook or body, turning an escaping panic into a `Panic` fault.
fn invoke<T>(entry: &CatalogEntry<'_, T>, subject: &mut T) -> Raises {
    let Some(body) = entry.method() else {
        return Ok(());
    };
    panic::catch_unwind(AssertUnwindSafe(|| body(subject))).unwrap_or_else(|payload| Err(Fault::from_panic(payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oopunit_core::faults;

    #[test]
    fn normal_return_without_expectation_succeeds() {
        assert_eq!(classify(Ok(()), None), TestResult::success());
        let mut rule = ExpectedException::none();
        assert_eq!(classify(Ok(()), Some(&mut rule)), TestResult::success());
    }

    #[test]
    fn normal_return_with_armed_expectation_is_an_error() {
        let mut rule = ExpectedException::none();
        rule.expect(&faults::INVALID_STATE);
        let result = classify(Ok(()), Some(&mut rule));
        assert_eq!(result.kind(), OutcomeKind::Error);
        assert_eq!(
            result.message(),
            Some("expected InvalidState to be raised, but the test returned normally")
        );
    }

    #[test]
    fn assertion_failures_ignore_the_expectation() {
        let mut rule = ExpectedException::none();
        rule.expect(&faults::FAULT);
        let raised = crate::assertions::fail("nope");
        assert_eq!(classify(raised, Some(&mut rule)), TestResult::failure(Some("nope")));
    }

    #[test]
    fn unexpected_fault_reports_its_kind() {
        let raised = Err(Fault::runtime("kaput"));
        assert_eq!(classify(raised, None), TestResult::error("RuntimeError"));
    }

    #[test]
    fn mismatch_names_both_kinds() {
        let mut rule = ExpectedException::none();
        rule.expect(&faults::INVALID_STATE);
        let raised = Err(Fault::with_message(&faults::ARITHMETIC_ERROR, "divide by zero"));
        assert_eq!(
            classify(raised, Some(&mut rule)),
            TestResult::mismatch("expected InvalidState but ArithmeticError: divide by zero was raised")
        );
    }
}
