//! Class-level ordering modes.

use crate::registry::{self, VocabInfo, row};

/// Whether a test class honours the declared order indices of its tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderingMode {
    /// Tests run sorted by declared order index; ties keep catalog order.
    Ordered,
    /// Tests run in catalog order; declared indices are ignored.
    #[default]
    Unordered,
}

/// Registry of ordering modes.
pub const ORDERING_MODES: &[VocabInfo<OrderingMode>] = &[
    row(
        OrderingMode::Ordered,
        "ORDERED",
        &["ordered"],
        "Run tests by ascending order index (stable).",
    ),
    row(
        OrderingMode::Unordered,
        "UNORDERED",
        &["unordered"],
        "Run tests in catalog order.",
    ),
];

/// Return the canonical spelling for an ordering mode.
pub fn as_str(mode: OrderingMode) -> &'static str {
    registry::find(ORDERING_MODES, mode).map_or("<unregistered mode>", |info| info.canonical)
}

/// Resolve a spelling to an ordering mode.
///
/// ## Examples
/// ```rust
/// use oopunit_core::ordering::{self, OrderingMode};
///
/// assert_eq!(ordering::from_str("ORDERED"), Some(OrderingMode::Ordered));
/// assert_eq!(ordering::from_str("unordered"), Some(OrderingMode::Unordered));
/// assert_eq!(ordering::from_str("random"), None);
/// ```
pub fn from_str(spelling: &str) -> Option<OrderingMode> {
    registry::resolve(ORDERING_MODES, spelling)
}

impl std::fmt::Display for OrderingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}
