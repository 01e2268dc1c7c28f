//! Selection and ordering of test members.

use oopunit_core::{OrderingMode, Role};

use crate::class::ClassDescriptor;

use super::catalog::{CatalogEntry, RoleCatalog};
use super::errors::ConfigError;

/// Filter `tests` by `tag` and order them per `ordering`.
///
/// - The empty tag selects every test; any other tag selects only tests whose tag is exactly equal.
/// - `Unordered` keeps catalog order. `Ordered` sorts by ascending order index, stably, so ties keep catalog
///   order.
pub fn select<'c, 'd, T>(
    tests: &'c [CatalogEntry<'d, T>],
    tag: &str,
    ordering: OrderingMode,
) -> Vec<&'c CatalogEntry<'d, T>> {
    let mut selected: Vec<&CatalogEntry<'d, T>> = tests
        .iter()
        .filter(|entry| tag.is_empty() || entry.tag() == tag)
        .collect();
    if ordering == OrderingMode::Ordered {
        selected.sort_by_key(|entry| entry.order());
    }
    selected
}

/// Select the tests of a catalogued class.
///
/// ## Errors
/// - [`ConfigError::MissingTestClassMarker`] if the class carries no test-class marker.
#[tracing::instrument(skip_all, fields(class = %descriptor.name, tag = tag))]
pub fn selection_for<'c, 'd, T>(
    descriptor: &ClassDescriptor<T>,
    catalog: &'c RoleCatalog<'d, T>,
    tag: &str,
) -> Result<Vec<&'c CatalogEntry<'d, T>>, ConfigError> {
    let ordering = descriptor.ordering().ok_or_else(|| ConfigError::MissingTestClassMarker {
        class: descriptor.name.clone(),
    })?;
    let selected = select(catalog.members(Role::Test), tag, ordering);
    tracing::debug!(selected = selected.len(), %ordering, "tests selected");
    Ok(selected)
}
