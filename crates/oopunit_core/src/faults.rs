//! The fault-kind hierarchy: oopunit's stand-in for exception classes.
//!
//! A [`FaultKind`] is a node in a tree rooted at [`FAULT`]. Kinds are declared as `static` items so that each
//! has exactly one address; identity and subtyping compare addresses, never names. User code declares its own
//! kinds the same way:
//!
//! ```rust
//! use oopunit_core::faults::{self, FaultKind};
//!
//! static OVERDRAWN: FaultKind = FaultKind::derived("Overdrawn", &faults::INVALID_STATE, "Balance went negative.");
//!
//! assert!(OVERDRAWN.is_a(&faults::RUNTIME_ERROR));
//! assert!(!faults::RUNTIME_ERROR.is_a(&OVERDRAWN));
//! ```
//!
//! ## Notes
//! - Never declare a kind as a `const`: every use of a `const` is a fresh copy with its own address, so it would
//!   never compare equal to itself across uses.

use std::fmt;
use std::ptr;

/// A node in the fault-kind hierarchy.
#[derive(Debug)]
pub struct FaultKind {
    name: &'static str,
    parent: Option<&'static FaultKind>,
    description: &'static str,
}

impl FaultKind {
    /// Declare a kind with no parent. Only [`FAULT`] should normally be a root.
    pub const fn root(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            parent: None,
            description,
        }
    }

    /// Declare a kind below `parent`.
    pub const fn derived(name: &'static str, parent: &'static FaultKind, description: &'static str) -> Self {
        Self {
            name,
            parent: Some(parent),
            description,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn parent(&self) -> Option<&'static FaultKind> {
        self.parent
    }

    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Whether `self` is `ancestor` or lies below it. Reflexive.
    pub fn is_a(&self, ancestor: &FaultKind) -> bool {
        self.lineage().any(|kind| ptr::eq(kind, ancestor))
    }

    /// Iterate `self` followed by each ancestor up to the root.
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage { next: Some(self) }
    }

    /// Number of edges between `self` and its root.
    pub fn depth(&self) -> usize {
        self.lineage().count() - 1
    }
}

impl PartialEq for FaultKind {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for FaultKind {}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Iterator over a kind and its ancestors. See [`FaultKind::lineage`].
pub struct Lineage<'a> {
    next: Option<&'a FaultKind>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a FaultKind;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent;
        Some(current)
    }
}

// ============================================================================
// Built-in kinds
// ============================================================================

/// Root of every fault.
pub static FAULT: FaultKind = FaultKind::root("Fault", "Anything a hook or test body can raise.");

/// The engine's own assertion signal, raised by the assertion primitives.
pub static ASSERTION_FAILURE: FaultKind =
    FaultKind::derived("AssertionFailure", &FAULT, "An assertion primitive did not hold.");

/// Root of the conditions user code is expected to raise and handle.
pub static EXCEPTION: FaultKind = FaultKind::derived("Exception", &FAULT, "A recoverable error condition.");

/// Errors that indicate a programming mistake rather than an environmental problem.
pub static RUNTIME_ERROR: FaultKind =
    FaultKind::derived("RuntimeError", &EXCEPTION, "A programming error detected at runtime.");

pub static INVALID_ARGUMENT: FaultKind =
    FaultKind::derived("InvalidArgument", &RUNTIME_ERROR, "An argument had an unacceptable value.");

pub static INVALID_STATE: FaultKind =
    FaultKind::derived("InvalidState", &RUNTIME_ERROR, "An operation was called in the wrong state.");

pub static ARITHMETIC_ERROR: FaultKind =
    FaultKind::derived("ArithmeticError", &RUNTIME_ERROR, "Overflow, division by zero, or similar.");

pub static INDEX_OUT_OF_BOUNDS: FaultKind =
    FaultKind::derived("IndexOutOfBounds", &RUNTIME_ERROR, "An index was outside its container.");

pub static MISSING_VALUE: FaultKind =
    FaultKind::derived("MissingValue", &RUNTIME_ERROR, "A required value was absent.");

pub static UNSUPPORTED_OPERATION: FaultKind = FaultKind::derived(
    "UnsupportedOperation",
    &RUNTIME_ERROR,
    "The operation is not supported by this value.",
);

/// Rust panics escaping a hook or test body are reported with this kind.
pub static PANIC: FaultKind = FaultKind::derived("Panic", &RUNTIME_ERROR, "A Rust panic was caught.");

pub static IO_ERROR: FaultKind = FaultKind::derived("IoError", &EXCEPTION, "An input/output operation failed.");

/// Registry of built-in kinds, parents before children.
pub static BUILTIN_FAULT_KINDS: &[&FaultKind] = &[
    &FAULT,
    &ASSERTION_FAILURE,
    &EXCEPTION,
    &RUNTIME_ERROR,
    &INVALID_ARGUMENT,
    &INVALID_STATE,
    &ARITHMETIC_ERROR,
    &INDEX_OUT_OF_BOUNDS,
    &MISSING_VALUE,
    &UNSUPPORTED_OPERATION,
    &PANIC,
    &IO_ERROR,
];

/// Resolve a built-in kind by its canonical name. Matching is case-sensitive.
///
/// ## Examples
/// ```rust
/// use oopunit_core::faults;
///
/// let kind = faults::from_str("InvalidArgument").unwrap();
/// assert!(kind.is_a(&faults::EXCEPTION));
/// assert!(faults::from_str("invalidargument").is_none());
/// ```
pub fn from_str(name: &str) -> Option<&'static FaultKind> {
    BUILTIN_FAULT_KINDS.iter().copied().find(|kind| kind.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    static CUSTOM: FaultKind = FaultKind::derived("Custom", &INVALID_ARGUMENT, "test kind");
    static LOOKALIKE: FaultKind = FaultKind::derived("Custom", &INVALID_ARGUMENT, "same name, other kind");

    #[test]
    fn is_a_is_reflexive_and_transitive() {
        assert!(CUSTOM.is_a(&CUSTOM));
        assert!(CUSTOM.is_a(&INVALID_ARGUMENT));
        assert!(CUSTOM.is_a(&RUNTIME_ERROR));
        assert!(CUSTOM.is_a(&FAULT));
        assert!(!CUSTOM.is_a(&ASSERTION_FAILURE));
        assert!(!EXCEPTION.is_a(&RUNTIME_ERROR));
    }

    #[test]
    fn identity_is_by_address_not_name() {
        assert_ne!(CUSTOM, LOOKALIKE);
        assert!(!CUSTOM.is_a(&LOOKALIKE));
        assert_eq!(CUSTOM.name(), LOOKALIKE.name());
    }

    #[test]
    fn lineage_walks_to_root() {
        let names: Vec<_> = CUSTOM.lineage().map(FaultKind::name).collect();
        assert_eq!(
            names,
            vec!["Custom", "InvalidArgument", "RuntimeError", "Exception", "Fault"]
        );
        assert_eq!(CUSTOM.depth(), 4);
        assert_eq!(FAULT.depth(), 0);
    }

    #[test]
    fn assertion_failure_is_not_an_exception() {
        assert!(!ASSERTION_FAILURE.is_a(&EXCEPTION));
        assert!(PANIC.is_a(&EXCEPTION));
    }
}
