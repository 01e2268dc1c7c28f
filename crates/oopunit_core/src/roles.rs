//! Lifecycle roles a test class member can carry, and the member kind each role may mark.

use crate::registry::{self, VocabInfo, row};

/// A declared purpose for a member of a test class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Runs once on the fresh subject, before any test.
    Setup,
    /// Runs before each test named in its applicability list.
    Before,
    /// A test body.
    Test,
    /// Runs after each test named in its applicability list.
    After,
    /// Designates the subject's exception expectation holder.
    ExceptionRule,
}

/// The shape of a declared member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A callable taking the subject mutably.
    Method,
    /// A designated slot on the subject.
    Field,
}

/// Metadata for a lifecycle role.
pub type RoleInfo = VocabInfo<Role>;

/// Registry of lifecycle roles, in lifecycle order.
pub const ROLES: &[RoleInfo] = &[
    row(Role::Setup, "setup", &[], "One-time initialisation run before the first test."),
    row(
        Role::Before,
        "before",
        &["before_each"],
        "Hook run before each listed test, ancestors first.",
    ),
    row(Role::Test, "test", &[], "A test body, filtered by tag and ordered by index."),
    row(
        Role::After,
        "after",
        &["after_each"],
        "Hook run after each listed test, most-derived first.",
    ),
    row(
        Role::ExceptionRule,
        "exception_rule",
        &["expected_exception"],
        "The holder of the per-test exception expectation.",
    ),
];

/// All roles in lifecycle order.
pub const ALL: [Role; 5] = [Role::Setup, Role::Before, Role::Test, Role::After, Role::ExceptionRule];

/// Return the canonical spelling for a role (e.g. `"before"`).
pub fn as_str(role: Role) -> &'static str {
    registry::find(ROLES, role).map_or("<unregistered role>", |info| info.canonical)
}

/// Resolve a spelling to a role.
pub fn from_str(spelling: &str) -> Option<Role> {
    registry::resolve(ROLES, spelling)
}

/// Return the only member kind a role marker may be placed on.
///
/// ## Examples
/// ```rust
/// use oopunit_core::roles::{self, MemberKind, Role};
///
/// assert_eq!(roles::expected_member_kind(Role::Test), MemberKind::Method);
/// assert_eq!(roles::expected_member_kind(Role::ExceptionRule), MemberKind::Field);
/// ```
pub const fn expected_member_kind(role: Role) -> MemberKind {
    match role {
        Role::Setup | Role::Before | Role::Test | Role::After => MemberKind::Method,
        Role::ExceptionRule => MemberKind::Field,
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberKind::Method => f.write_str("method"),
            MemberKind::Field => f.write_str("field"),
        }
    }
}
