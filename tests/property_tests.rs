//! Property-based tests for selection, ordering, and classification
//!
//! These tests use proptest to verify invariants across many randomly
//! generated test classes, catching edge cases that hand-written tests might miss.

use oopunit::faults;
use oopunit::{
    ClassDescriptor, ExpectedException, Fault, MemberDecl, OrderingMode, OutcomeKind, Raises, Snapshot, TypeLevel,
    run_descriptor,
};
use proptest::prelude::*;

#[derive(Default, Snapshot)]
struct Subject {
    counter: u32,
}

fn bump(subject: &mut Subject) -> Raises {
    subject.counter += 1;
    Ok(())
}

/// A declared test: (order index, tag).
type Decl = (i32, String);

fn decl_strategy() -> impl Strategy<Value = Decl> {
    (-3i32..=3, prop::sample::select(vec!["", "fast", "slow"]).prop_map(str::to_string))
}

fn class_strategy() -> impl Strategy<Value = Vec<Decl>> {
    prop::collection::vec(decl_strategy(), 0..12)
}

fn descriptor(decls: &[Decl], mode: OrderingMode) -> ClassDescriptor<Subject> {
    let level = decls
        .iter()
        .enumerate()
        .fold(TypeLevel::new("Generated"), |level, (index, (order, tag))| {
            level.member(MemberDecl::test_with(format!("t{index}"), *order, tag.as_str(), bump))
        });
    ClassDescriptor::new("Generated")
        .marked(mode)
        .constructor(Subject::default)
        .level(level)
}

/// Declaration indices of the executed tests, in execution order.
fn executed_indices(decls: &[Decl], mode: OrderingMode, tag: &str) -> Vec<usize> {
    let summary = run_descriptor(&descriptor(decls, mode), tag).expect("generated class is valid");
    summary
        .executed()
        .iter()
        .map(|name| name.trim_start_matches('t').parse().expect("generated name"))
        .collect()
}

// =============================================================================
// Selection Properties
// =============================================================================

mod selection_properties {
    use super::*;

    proptest! {
        /// Property: a non-empty tag selects exactly the tests carrying it; the empty tag selects all
        #[test]
        fn tag_filter_is_exact(
            decls in class_strategy(),
            tag in prop::sample::select(vec!["", "fast", "slow", "none"]),
        ) {
            let mut selected = executed_indices(&decls, OrderingMode::Unordered, tag);
            selected.sort_unstable();
            let expected: Vec<usize> = decls
                .iter()
                .enumerate()
                .filter(|(_, (_, declared))| tag.is_empty() || declared == tag)
                .map(|(index, _)| index)
                .collect();
            prop_assert_eq!(selected, expected);
        }

        /// Property: unordered classes run in declaration order regardless of indices
        #[test]
        fn unordered_keeps_declaration_order(decls in class_strategy()) {
            let executed = executed_indices(&decls, OrderingMode::Unordered, "");
            prop_assert_eq!(executed, (0..decls.len()).collect::<Vec<_>>());
        }

        /// Property: ordered classes run by non-decreasing index, ties in declaration order
        #[test]
        fn ordered_is_a_stable_sort(decls in class_strategy(), tag in prop::sample::select(vec!["", "fast"])) {
            let executed = executed_indices(&decls, OrderingMode::Ordered, tag);
            for pair in executed.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(decls[a].0 < decls[b].0 || (decls[a].0 == decls[b].0 && a < b));
            }
        }
    }
}

// =============================================================================
// Classification Properties
// =============================================================================

#[derive(Default, Snapshot)]
struct Armed {
    rule: ExpectedException,
}

fn rule(subject: &mut Armed) -> &mut ExpectedException {
    &mut subject.rule
}

fn arm_and_fail(subject: &mut Armed) -> Raises {
    subject.rule.expect(&faults::INVALID_STATE);
    oopunit::fail("assertion wins")
}

mod classification_properties {
    use super::*;

    proptest! {
        /// Property: the assertion signal yields FAILURE no matter how many tests share the class
        #[test]
        fn assertion_signal_is_always_failure(count in 1usize..6) {
            let level = TypeLevel::new("Armed").member(MemberDecl::exception_rule("rule", rule));
            let level = (0..count).fold(level, |level, index| {
                level.member(MemberDecl::test(format!("t{index}"), arm_and_fail))
            });
            let descriptor = ClassDescriptor::new("Armed")
                .marked(OrderingMode::Unordered)
                .constructor(Armed::default)
                .level(level);
            let summary = run_descriptor(&descriptor, "").expect("valid class");
            prop_assert_eq!(summary.count(OutcomeKind::Failure), count);
        }

        /// Property: an expected fault matches any message when no substring is required
        #[test]
        fn expectation_without_substrings_ignores_message(message in ".*") {
            let mut expectation = ExpectedException::none();
            expectation.expect(&faults::RUNTIME_ERROR);
            let thrown = Fault::with_message(&faults::INVALID_ARGUMENT, message);
            prop_assert!(expectation.assert_expected(&thrown));
        }
    }
}
