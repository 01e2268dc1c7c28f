//! Assertion primitives for test bodies.
//!
//! Each primitive returns `Err` carrying an `AssertionFailure` fault instead of panicking, so a test body
//! propagates it with `?`:
//!
//! ```rust
//! use oopunit::assertions::{assert_equals, assert_true};
//! use oopunit::Raises;
//!
//! fn adds_up() -> Raises {
//!     assert_equals(4, 2 + 2)?;
//!     assert_true(3 > 2)?;
//!     Ok(())
//! }
//! assert!(adds_up().is_ok());
//! ```

use std::fmt::Debug;

use oopunit_core::faults;

use crate::fault::{Fault, Raises};

/// Fail unless `expected == actual`.
///
/// Use `Option` operands for nullable values: `None == None` holds and `None != Some(_)` fails, which gives
/// null-safe equality.
pub fn assert_equals<T: PartialEq + Debug>(expected: T, actual: T) -> Raises {
    if expected == actual {
        Ok(())
    } else {
        Err(Fault::with_message(
            &faults::ASSERTION_FAILURE,
            format!("expected {expected:?} but was {actual:?}"),
        ))
    }
}

/// Fail unless `condition` holds.
pub fn assert_true(condition: bool) -> Raises {
    if condition {
        Ok(())
    } else {
        Err(Fault::with_message(&faults::ASSERTION_FAILURE, "condition was false"))
    }
}

/// Fail unconditionally.
pub fn fail(message: impl Into<String>) -> Raises {
    Err(Fault::with_message(&faults::ASSERTION_FAILURE, message))
}
