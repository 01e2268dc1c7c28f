//! Best-effort state isolation between tests.
//!
//! Before each test the executor takes a [`Backup`] of the subject: a fresh instance from the class's
//! zero-argument constructor whose fields are then filled from the subject by [`Snapshot::copy_state_from`].
//! After a non-success outcome the subject is restored from that backup, field by field, duplicating again so
//! the subject and the backup never end up sharing a value that could have been copied.
//!
//! `#[derive(Snapshot)]` chooses per field, at compile time, the strongest duplication the field type offers:
//!
//! | tier | capability                      | effect                                     |
//! |------|---------------------------------|--------------------------------------------|
//! | 1    | [`Duplicate`]                   | an independent copy                        |
//! | 2    | `From<&Self>` (copy constructor)| an independent copy                        |
//! | 3    | [`SharedHandle`]                | another handle to the *same* allocation    |
//!
//! Tier 3 is a known isolation gap: restoring reassigns the subject's slot but cannot undo mutations made
//! through the shared handle (e.g. the contents of an `Rc<RefCell<_>>`).

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Arc;

use crate::engine::errors::{EngineError, EngineResult};
use crate::fault::Fault;

pub use oopunit_derive::Snapshot;

/// Field-wise copy of a test subject's state. Usually derived.
pub trait Snapshot: Sized {
    /// Names of the fields covered by [`Snapshot::copy_state_from`], in declaration order.
    const FIELDS: &'static [&'static str];

    /// Overwrite every covered field of `self` with a duplicate of the same field of `source`.
    fn copy_state_from(&mut self, source: &Self);
}

/// Opt-in self-duplication. The result must share no mutable state with `self`.
pub trait Duplicate {
    fn duplicate(&self) -> Self;
}

/// Implement [`Duplicate`] by delegating to `Clone` for types whose clone is a deep copy.
///
/// ```rust
/// #[derive(Clone)]
/// struct Ledger(Vec<i64>);
///
/// oopunit::impl_duplicate_via_clone!(Ledger);
/// ```
#[macro_export]
macro_rules! impl_duplicate_via_clone {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::snapshot::Duplicate for $ty {
                fn duplicate(&self) -> Self {
                    ::std::clone::Clone::clone(self)
                }
            }
        )+
    };
}

impl_duplicate_via_clone!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    std::path::PathBuf,
    std::time::Duration,
);

impl<T: Duplicate> Duplicate for Option<T> {
    fn duplicate(&self) -> Self {
        self.as_ref().map(T::duplicate)
    }
}

impl<T: Duplicate> Duplicate for Box<T> {
    fn duplicate(&self) -> Self {
        Box::new(T::duplicate(self))
    }
}

impl<T: Duplicate> Duplicate for RefCell<T> {
    fn duplicate(&self) -> Self {
        RefCell::new(self.borrow().duplicate())
    }
}

impl<T: Duplicate> Duplicate for Vec<T> {
    fn duplicate(&self) -> Self {
        self.iter().map(T::duplicate).collect()
    }
}

impl<T: Duplicate> Duplicate for VecDeque<T> {
    fn duplicate(&self) -> Self {
        self.iter().map(T::duplicate).collect()
    }
}

impl<T: Duplicate, const N: usize> Duplicate for [T; N] {
    fn duplicate(&self) -> Self {
        std::array::from_fn(|index| self[index].duplicate())
    }
}

impl<K: Duplicate + Eq + Hash, V: Duplicate> Duplicate for HashMap<K, V> {
    fn duplicate(&self) -> Self {
        self.iter().map(|(k, v)| (k.duplicate(), v.duplicate())).collect()
    }
}

impl<K: Duplicate + Ord, V: Duplicate> Duplicate for BTreeMap<K, V> {
    fn duplicate(&self) -> Self {
        self.iter().map(|(k, v)| (k.duplicate(), v.duplicate())).collect()
    }
}

impl<T: Duplicate + Eq + Hash> Duplicate for HashSet<T> {
    fn duplicate(&self) -> Self {
        self.iter().map(T::duplicate).collect()
    }
}

impl<T: Duplicate + Ord> Duplicate for BTreeSet<T> {
    fn duplicate(&self) -> Self {
        self.iter().map(T::duplicate).collect()
    }
}

impl<A: Duplicate, B: Duplicate> Duplicate for (A, B) {
    fn duplicate(&self) -> Self {
        (self.0.duplicate(), self.1.duplicate())
    }
}

impl<A: Duplicate, B: Duplicate, C: Duplicate> Duplicate for (A, B, C) {
    fn duplicate(&self) -> Self {
        (self.0.duplicate(), self.1.duplicate(), self.2.duplicate())
    }
}

/// A handle whose copies alias one allocation. Used as the last-resort snapshot tier.
pub trait SharedHandle {
    fn share(&self) -> Self;
}

impl<T: ?Sized> SharedHandle for Rc<T> {
    fn share(&self) -> Self {
        Rc::clone(self)
    }
}

impl<T: ?Sized> SharedHandle for Arc<T> {
    fn share(&self) -> Self {
        Arc::clone(self)
    }
}

impl<T: ?Sized> SharedHandle for &'static T {
    fn share(&self) -> Self {
        *self
    }
}

// ============================================================================
// Tier selection used by #[derive(Snapshot)]
// ============================================================================
//
// Generated code calls `(&&&FieldRef(&field)).snapshot_field()`. Method lookup tries the receiver with the
// most references first, so the impl on `&&FieldRef` (tier 1) shadows `&FieldRef` (tier 2), which shadows
// `FieldRef` (tier 3). An impl whose bounds do not hold is skipped.

#[doc(hidden)]
pub struct FieldRef<'a, F>(pub &'a F);

#[doc(hidden)]
pub trait ByDuplicate {
    type Field;
    fn snapshot_field(&self) -> Self::Field;
}

impl<F: Duplicate> ByDuplicate for &&FieldRef<'_, F> {
    type Field = F;
    fn snapshot_field(&self) -> F {
        F::duplicate(self.0)
    }
}

#[doc(hidden)]
pub trait ByCopy {
    type Field;
    fn snapshot_field(&self) -> Self::Field;
}

impl<F> ByCopy for &FieldRef<'_, F>
where
    F: for<'x> From<&'x F>,
{
    type Field = F;
    fn snapshot_field(&self) -> F {
        F::from(self.0)
    }
}

#[doc(hidden)]
pub trait ByShare {
    type Field;
    fn snapshot_field(&self) -> Self::Field;
}

impl<F: SharedHandle> ByShare for FieldRef<'_, F> {
    type Field = F;
    fn snapshot_field(&self) -> F {
        F::share(self.0)
    }
}

// ============================================================================
// Backup / restore
// ============================================================================

/// An isolated copy of a subject's state, taken before one test.
pub struct Backup<T> {
    state: T,
}

// No `T: Debug` bound: subjects need not be printable.
impl<T: Snapshot> std::fmt::Debug for Backup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backup").field("fields", &T::FIELDS).finish_non_exhaustive()
    }
}

impl<T> Backup<T> {
    pub fn state(&self) -> &T {
        &self.state
    }
}

/// Takes and restores [`Backup`]s for one test class.
pub struct SnapshotService<'a, T> {
    class: &'a str,
    constructor: Option<fn() -> T>,
}

impl<'a, T: Snapshot> SnapshotService<'a, T> {
    pub fn new(class: &'a str, constructor: Option<fn() -> T>) -> Self {
        Self { class, constructor }
    }

    /// Build a fresh instance and copy `subject`'s state into it.
    ///
    /// ## Errors
    /// - [`EngineError::SnapshotUnavailable`] if the class has no zero-argument constructor, or if the
    ///   constructor or a field copy panics. This is fatal to the run.
    pub fn backup(&self, subject: &T) -> EngineResult<Backup<T>> {
        let constructor = self.constructor.ok_or_else(|| EngineError::SnapshotUnavailable {
            class: self.class.to_string(),
            reason: "no zero-argument constructor is registered".to_string(),
        })?;
        let mut state = panic::catch_unwind(AssertUnwindSafe(constructor))
            .map_err(|payload| self.unavailable("constructor", payload))?;
        panic::catch_unwind(AssertUnwindSafe(|| state.copy_state_from(subject)))
            .map_err(|payload| self.unavailable("copying state", payload))?;
        tracing::trace!(class = self.class, fields = T::FIELDS.len(), "backup taken");
        Ok(Backup { state })
    }

    /// Copy the backed-up state onto `subject`, duplicating each field again.
    ///
    /// ## Errors
    /// - [`EngineError::SnapshotUnavailable`] if a field copy panics. `subject` may then be partly restored.
    pub fn restore(&self, subject: &mut T, backup: &Backup<T>) -> EngineResult<()> {
        panic::catch_unwind(AssertUnwindSafe(|| subject.copy_state_from(&backup.state)))
            .map_err(|payload| self.unavailable("restoring state", payload))?;
        tracing::trace!(class = self.class, fields = ?T::FIELDS, "subject restored from backup");
        Ok(())
    }

    fn unavailable(&self, step: &str, payload: Box<dyn std::any::Any + Send>) -> EngineError {
        EngineError::SnapshotUnavailable {
            class: self.class.to_string(),
            reason: format!("{step} raised {}", Fault::from_panic(payload)),
        }
    }
}
