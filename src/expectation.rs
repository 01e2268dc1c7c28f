//! The per-test exception expectation ("exception rule").
//!
//! A test subject exposes one [`ExpectedException`] through the `exception_rule` member of its descriptor. The
//! executor resets it before every test; the test body may then arm it before acting:
//!
//! ```rust
//! use oopunit::faults;
//! use oopunit::{ExpectedException, Fault};
//!
//! let mut rule = ExpectedException::none();
//! rule.expect(&faults::RUNTIME_ERROR).expect_message("overdrawn");
//!
//! let thrown = Fault::with_message(&faults::INVALID_STATE, "account overdrawn by 5");
//! assert!(rule.assert_expected(&thrown));
//! ```

use oopunit_core::faults::FaultKind;

use crate::fault::Fault;
use crate::snapshot::Duplicate;

/// An optional expected fault kind plus the substrings its message must contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedException {
    expected: Option<&'static FaultKind>,
    messages: Vec<String>,
}

impl ExpectedException {
    /// An expectation that expects nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Clear back to "nothing expected, no required substrings".
    pub fn reset(&mut self) {
        self.expected = None;
        self.messages.clear();
    }

    /// Expect a fault of `kind` or any kind below it. Replaces an earlier expectation.
    pub fn expect(&mut self, kind: &'static FaultKind) -> &mut Self {
        self.expected = Some(kind);
        self
    }

    /// Require the raised fault's message to contain `substring`. Repeated substrings are kept once.
    pub fn expect_message(&mut self, substring: impl Into<String>) -> &mut Self {
        let substring = substring.into();
        if !self.messages.contains(&substring) {
            self.messages.push(substring);
        }
        self
    }

    pub fn expected_exception(&self) -> Option<&'static FaultKind> {
        self.expected
    }

    pub fn required_messages(&self) -> &[String] {
        &self.messages
    }

    /// Whether `thrown` satisfies this expectation.
    ///
    /// Holds iff an expected kind is set, `thrown`'s kind is it or lies below it, and every required substring
    /// occurs in `thrown`'s message. A fault without a message only matches when no substrings are required.
    pub fn assert_expected(&self, thrown: &Fault) -> bool {
        let Some(expected) = self.expected else {
            return false;
        };
        if !thrown.kind().is_a(expected) {
            return false;
        }
        if self.messages.is_empty() {
            return true;
        }
        match thrown.message() {
            Some(message) => self.messages.iter().all(|needle| message.contains(needle.as_str())),
            None => false,
        }
    }
}

impl Duplicate for ExpectedException {
    fn duplicate(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oopunit_core::faults;

    static OVERDRAWN: FaultKind = FaultKind::derived("Overdrawn", &faults::INVALID_STATE, "test kind");

    #[test]
    fn subkinds_match_and_unrelated_kinds_do_not() {
        let mut rule = ExpectedException::none();
        rule.expect(&faults::INVALID_STATE);

        assert!(rule.assert_expected(&Fault::new(&faults::INVALID_STATE)));
        assert!(rule.assert_expected(&Fault::new(&OVERDRAWN)));
        assert!(!rule.assert_expected(&Fault::new(&faults::RUNTIME_ERROR)));
        assert!(!rule.assert_expected(&Fault::new(&faults::INVALID_ARGUMENT)));
    }

    #[test]
    fn every_required_substring_must_occur() {
        let mut rule = ExpectedException::none();
        rule.expect(&faults::EXCEPTION)
            .expect_message("balance")
            .expect_message("negative");

        let both = Fault::with_message(&OVERDRAWN, "negative balance: -5");
        let one = Fault::with_message(&OVERDRAWN, "balance is -5");
        let silent = Fault::new(&OVERDRAWN);

        assert!(rule.assert_expected(&both));
        assert!(!rule.assert_expected(&one));
        assert!(!rule.assert_expected(&silent));
    }

    #[test]
    fn no_substrings_means_any_message_matches() {
        let mut rule = ExpectedException::none();
        rule.expect(&faults::ARITHMETIC_ERROR);
        assert!(rule.assert_expected(&Fault::new(&faults::ARITHMETIC_ERROR)));
        assert!(rule.assert_expected(&Fault::with_message(&faults::ARITHMETIC_ERROR, "anything")));
    }

    #[test]
    fn expect_replaces_and_reset_clears() {
        let mut rule = ExpectedException::none();
        rule.expect(&faults::IO_ERROR).expect(&faults::MISSING_VALUE).expect_message("x");
        rule.expect_message("x");
        assert_eq!(rule.expected_exception(), Some(&faults::MISSING_VALUE));
        assert_eq!(rule.required_messages(), ["x".to_string()]);

        rule.reset();
        assert_eq!(rule, ExpectedException::none());
        assert!(!rule.assert_expected(&Fault::new(&faults::MISSING_VALUE)));
    }
}
