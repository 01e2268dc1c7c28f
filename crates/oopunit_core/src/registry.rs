//! Shareable metadata for the vocabulary registries.
//!
//! Each registry in this crate is a `const` table of [`VocabInfo`] rows keyed by a small `Copy` id enum.
//! The helpers here keep lookups uniform across registries.

/// Shared metadata shape for registry rows.
///
/// ## Notes
/// - `canonical` is the spelling used in user-facing output (reports, diagnostics, CLI).
/// - `aliases` are accepted when parsing but never printed.
/// - This type is `Copy` so it can live in `const` tables.
#[derive(Debug, Clone, Copy)]
pub struct VocabInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

/// Find the row for `id` in `table`.
///
/// ## Returns
/// - `None` only when the registry is missing a row (a programming error caught by the guardrail tests).
pub fn find<Id: PartialEq + Copy>(table: &'static [VocabInfo<Id>], id: Id) -> Option<&'static VocabInfo<Id>> {
    table.iter().find(|row| row.id == id)
}

/// Resolve a spelling (canonical first, then aliases) to an id. Matching is case-sensitive.
pub fn resolve<Id: Copy>(table: &'static [VocabInfo<Id>], spelling: &str) -> Option<Id> {
    if let Some(row) = table.iter().find(|row| row.canonical == spelling) {
        return Some(row.id);
    }
    table
        .iter()
        .find(|row| row.aliases.contains(&spelling))
        .map(|row| row.id)
}

pub(crate) const fn row<Id>(
    id: Id,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> VocabInfo<Id> {
    VocabInfo {
        id,
        canonical,
        aliases,
        description,
    }
}
