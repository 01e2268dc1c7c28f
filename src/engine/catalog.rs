//! Metadata catalog: role discovery across the inheritance chain with override resolution.
//!
//! ## Override resolution
//!
//! Levels are walked from the concrete type upward. Each declared member has a [`MemberIdentity`]; the first
//! member seen with a given identity wins and every later (more ancestral) one is shadowed. Overridable
//! members are identified by member kind and name, so a descendant's method replaces its ancestor's method of
//! the same name but leaves a same-named field alone. Private and static members are identified by their
//! declaration site and are never shadowed.
//!
//! Unmarked members take part in shadowing too: a descendant that overrides a marked ancestor method without
//! re-marking it removes that member from its role.
//!
//! Survivors are then ordered root-to-leaf, by declaring level and declaration index. An overriding member
//! therefore sits at its own declaration site.

use std::collections::{HashMap, HashSet};
use std::fmt;

use oopunit_core::{MemberKind, Role, roles};

use crate::class::{ClassDescriptor, MemberBody, MemberDecl, MethodFn, RoleMarker, RuleAccessor};

use super::errors::ConfigError;

/// Identity of a member for override resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberIdentity {
    /// Overridable members: any same-named member of the same kind below replaces this one.
    /// Fields and methods live in separate namespaces.
    Overridable { kind: MemberKind, name: String },
    /// Private/static members: unique per declaration site.
    Sealed { level: usize, index: usize },
}

impl MemberIdentity {
    fn of<T>(decl: &MemberDecl<T>, level: usize, index: usize) -> Self {
        if decl.visibility.is_overridable() {
            MemberIdentity::Overridable {
                kind: decl.body.kind(),
                name: decl.name.clone(),
            }
        } else {
            MemberIdentity::Sealed { level, index }
        }
    }
}

/// A surviving marked member.
pub struct CatalogEntry<'d, T> {
    pub name: &'d str,
    /// Index of the declaring level; 0 is the root of the chain.
    pub level: usize,
    pub level_name: &'d str,
    /// Declaration index within the declaring level.
    pub index: usize,
    pub identity: MemberIdentity,
    pub marker: &'d RoleMarker,
    pub body: MemberBody<T>,
}

impl<T> CatalogEntry<'_, T> {
    pub fn role(&self) -> Role {
        self.marker.role()
    }

    /// Declared order index. Zero for anything but a test.
    pub fn order(&self) -> i32 {
        match self.marker {
            RoleMarker::Test { order, .. } => *order,
            _ => 0,
        }
    }

    /// Declared tag. Empty for anything but a test.
    pub fn tag(&self) -> &str {
        match self.marker {
            RoleMarker::Test { tag, .. } => tag,
            _ => "",
        }
    }

    /// Whether a before/after hook lists `test` in its applicability list.
    pub fn applies_to(&self, test: &str) -> bool {
        match self.marker {
            RoleMarker::Before { applies_to } | RoleMarker::After { applies_to } => {
                applies_to.iter().any(|name| name == test)
            }
            _ => false,
        }
    }

    pub fn method(&self) -> Option<MethodFn<T>> {
        match self.body {
            MemberBody::Method(body) => Some(body),
            MemberBody::Field(_) => None,
        }
    }
}

// Manual impls keep `T: Debug` off the catalog; subjects need not be printable.
impl<T> fmt::Debug for CatalogEntry<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("level_name", &self.level_name)
            .field("index", &self.index)
            .field("identity", &self.identity)
            .field("marker", self.marker)
            .field("body", &self.body)
            .finish()
    }
}

/// Marked members grouped by role, each group in catalog order.
pub struct RoleCatalog<'d, T> {
    groups: HashMap<Role, Vec<CatalogEntry<'d, T>>>,
}

impl<T> fmt::Debug for RoleCatalog<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleCatalog").field("groups", &self.groups).finish()
    }
}

impl<'d, T> RoleCatalog<'d, T> {
    pub fn members(&self, role: Role) -> &[CatalogEntry<'d, T>] {
        self.groups.get(&role).map_or(&[], Vec::as_slice)
    }

    /// The exception expectation holder. With several, the most-derived one wins.
    pub fn exception_rule(&self) -> Option<RuleAccessor<T>> {
        self.members(Role::ExceptionRule)
            .iter()
            .rev()
            .find_map(|entry| match entry.body {
                MemberBody::Field(accessor) => Some(accessor),
                MemberBody::Method(_) => None,
            })
    }

    /// Total number of catalogued members across all roles.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the role catalog of a class.
///
/// ## Errors
/// - [`ConfigError::WrongMemberKind`] if any declaration, shadowed or not, carries a marker its member kind
///   cannot hold.
#[tracing::instrument(skip_all, fields(class = %descriptor.name, levels = descriptor.levels.len()))]
pub fn discover<T>(descriptor: &ClassDescriptor<T>) -> Result<RoleCatalog<'_, T>, ConfigError> {
    let mut seen: HashSet<MemberIdentity> = HashSet::new();
    let mut survivors: Vec<CatalogEntry<'_, T>> = Vec::new();

    for (level, type_level) in descriptor.levels.iter().enumerate().rev() {
        for (index, decl) in type_level.members.iter().enumerate() {
            if let Some(marker) = &decl.marker {
                check_member_kind(&descriptor.name, decl, marker)?;
            }

            let identity = MemberIdentity::of(decl, level, index);
            if !seen.insert(identity.clone()) {
                tracing::trace!(member = %decl.name, level = %type_level.name, "shadowed by an override");
                continue;
            }
            let Some(marker) = &decl.marker else {
                continue;
            };
            survivors.push(CatalogEntry {
                name: &decl.name,
                level,
                level_name: &type_level.name,
                index,
                identity,
                marker,
                body: decl.body,
            });
        }
    }

    survivors.sort_by_key(|entry| (entry.level, entry.index));

    let mut groups: HashMap<Role, Vec<CatalogEntry<'_, T>>> = HashMap::new();
    for entry in survivors {
        groups.entry(entry.role()).or_default().push(entry);
    }
    let catalog = RoleCatalog { groups };
    tracing::debug!(members = catalog.len(), "catalog built");
    Ok(catalog)
}

fn check_member_kind<T>(class: &str, decl: &MemberDecl<T>, marker: &RoleMarker) -> Result<(), ConfigError> {
    let role = marker.role();
    let expected = roles::expected_member_kind(role);
    let found = decl.body.kind();
    if found == expected {
        Ok(())
    } else {
        Err(ConfigError::WrongMemberKind {
            class: class.to_string(),
            member: decl.name.clone(),
            role,
            found,
            expected,
        })
    }
}
