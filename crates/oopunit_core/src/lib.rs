//! Provide the canonical vocabulary shared by the oopunit engine, its derive macros, and its CLI.
//!
//! This crate is intentionally small and dependency-free. It holds the "registry-first" tables that every
//! other layer consults instead of matching on ad hoc strings:
//! - lifecycle roles and the member kind each role may mark ([`roles`]),
//! - class ordering modes ([`ordering`]),
//! - per-test outcome kinds ([`outcomes`]),
//! - the fault-kind hierarchy used in place of exception classes ([`faults`]).
//!
//! ## Notes
//!
//! - No IO, no global mutable state, no engine types. Everything here can live in `const`/`static` tables.

pub mod faults;
pub mod ordering;
pub mod outcomes;
pub mod registry;
pub mod roles;

pub use faults::FaultKind;
pub use ordering::OrderingMode;
pub use outcomes::OutcomeKind;
pub use roles::{MemberKind, Role};
