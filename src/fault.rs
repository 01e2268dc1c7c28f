//! The value raised by hooks and test bodies.
//!
//! Hooks and test bodies return [`Raises`]; an `Err(Fault)` is oopunit's "thrown exception". A Rust panic that
//! escapes a hook or body is caught by the executor and converted with [`Fault::from_panic`].

use std::any::Any;
use std::fmt;

use oopunit_core::faults::{self, FaultKind};

/// The return type of every hook and test body.
pub type Raises = Result<(), Fault>;

/// A raised fault: its kind plus an optional message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    kind: &'static FaultKind,
    message: Option<String>,
}

impl Fault {
    /// A fault with no message.
    pub fn new(kind: &'static FaultKind) -> Self {
        Self { kind, message: None }
    }

    pub fn with_message(kind: &'static FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Shorthand for a `RuntimeError` with a message.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::with_message(&faults::RUNTIME_ERROR, message)
    }

    /// Convert a caught panic payload into a `Panic` fault.
    ///
    /// `panic!` payloads are `&'static str` or `String`; anything else is reported without a message.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(text) => Some(*text),
            Err(payload) => payload.downcast_ref::<&'static str>().map(|text| (*text).to_string()),
        };
        Self {
            kind: &faults::PANIC,
            message,
        }
    }

    pub fn kind(&self) -> &'static FaultKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether this is the engine's assertion signal.
    pub fn is_assertion_failure(&self) -> bool {
        self.kind.is_a(&faults::ASSERTION_FAILURE)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.kind, message),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Fault {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message_when_present() {
        assert_eq!(Fault::new(&faults::INVALID_STATE).to_string(), "InvalidState");
        assert_eq!(
            Fault::with_message(&faults::INDEX_OUT_OF_BOUNDS, "index 4 of 3").to_string(),
            "IndexOutOfBounds: index 4 of 3"
        );
    }

    fn caught(f: impl FnOnce() + std::panic::UnwindSafe) -> Box<dyn Any + Send> {
        std::panic::catch_unwind(f).unwrap_err()
    }

    #[test]
    fn panic_payloads_become_panic_faults() {
        let fault = Fault::from_panic(caught(|| panic!("boom {}", 7)));
        assert_eq!(fault.kind(), &faults::PANIC);
        assert_eq!(fault.message(), Some("boom 7"));

        assert_eq!(
            Fault::from_panic(caught(|| panic!("static text"))).message(),
            Some("static text")
        );
        assert_eq!(Fault::from_panic(caught(|| std::panic::panic_any(42_u8))).message(), None);
    }

    #[test]
    fn only_assertion_kinds_are_assertion_failures() {
        assert!(Fault::new(&faults::ASSERTION_FAILURE).is_assertion_failure());
        assert!(!Fault::runtime("nope").is_assertion_failure());
    }
}
