use std::collections::HashMap;
use std::ptr;

use oopunit_core::faults;
use oopunit_core::ordering;
use oopunit_core::outcomes;
use oopunit_core::roles;

#[test]
fn role_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, roles::Role> = HashMap::new();

    for &role in &roles::ALL {
        let canonical = roles::as_str(role);
        assert_eq!(
            roles::from_str(canonical),
            Some(role),
            "role canonical spelling not resolvable: {canonical}"
        );
        if let Some(prev) = seen.insert(canonical, role) {
            panic!("duplicate role spelling {canonical:?}: {prev:?} and {role:?}");
        }
    }

    for info in roles::ROLES {
        for &alias in info.aliases {
            assert_eq!(roles::from_str(alias), Some(info.id), "role alias not resolvable: {alias}");
            if let Some(prev) = seen.insert(alias, info.id) {
                panic!("duplicate role alias {alias:?}: {prev:?} and {:?}", info.id);
            }
        }
    }
    assert_eq!(roles::ROLES.len(), roles::ALL.len(), "every role needs exactly one registry row");
}

#[test]
fn outcome_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, outcomes::OutcomeKind> = HashMap::new();

    for &kind in &outcomes::ALL {
        let canonical = outcomes::as_str(kind);
        assert_eq!(outcomes::from_str(canonical), Some(kind));
        if let Some(prev) = seen.insert(canonical, kind) {
            panic!("duplicate outcome spelling {canonical:?}: {prev:?} and {kind:?}");
        }
    }
    assert_eq!(outcomes::OUTCOMES.len(), outcomes::ALL.len());
}

#[test]
fn ordering_modes_resolvable() {
    for info in ordering::ORDERING_MODES {
        assert_eq!(ordering::as_str(info.id), info.canonical);
        assert_eq!(ordering::from_str(info.canonical), Some(info.id));
    }
    assert_eq!(ordering::OrderingMode::default(), ordering::OrderingMode::Unordered);
}

#[test]
fn builtin_fault_kinds_listed_parents_first() {
    for (index, kind) in faults::BUILTIN_FAULT_KINDS.iter().enumerate() {
        if let Some(parent) = kind.parent() {
            let parent_index = faults::BUILTIN_FAULT_KINDS
                .iter()
                .position(|k| ptr::eq(*k, parent))
                .unwrap_or_else(|| panic!("parent of {} is not registered", kind.name()));
            assert!(
                parent_index < index,
                "{} is listed before its parent {}",
                kind.name(),
                parent.name()
            );
        }
    }
}

#[test]
fn builtin_fault_names_unique_and_rooted() {
    let mut seen: HashMap<&'static str, usize> = HashMap::new();
    for (index, kind) in faults::BUILTIN_FAULT_KINDS.iter().enumerate() {
        if let Some(prev) = seen.insert(kind.name(), index) {
            panic!("duplicate fault kind name {:?} at {prev} and {index}", kind.name());
        }
        assert!(kind.is_a(&faults::FAULT), "{} is not below Fault", kind.name());
        assert_eq!(faults::from_str(kind.name()), Some(*kind));
        assert!(!kind.description().is_empty(), "{} needs a description", kind.name());
    }
}
