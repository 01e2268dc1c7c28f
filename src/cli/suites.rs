//! Bundled demo suites.
//!
//! Each suite is an ordinary [`TestClass`]; [`SUITES`] is the registry the CLI lists and runs.

use crate::class::{ClassDescriptor, MemberDecl, TestClass, TypeLevel};
use crate::engine::{EngineResult, run_all_tagged};
use crate::expectation::ExpectedException;
use crate::fault::{Fault, Raises};
use crate::faults;
use crate::outcome::RunSummary;
use crate::snapshot::Snapshot;
use crate::{OrderingMode, assert_equals, assert_true};

/// Metadata and entry point for one bundled suite.
#[derive(Debug, Clone, Copy)]
pub struct SuiteInfo {
    pub name: &'static str,
    pub description: &'static str,
    runner: fn(&str) -> EngineResult<RunSummary>,
}

impl SuiteInfo {
    pub fn run(&self, tag: &str) -> EngineResult<RunSummary> {
        (self.runner)(tag)
    }
}

/// Registry of bundled suites, in listing order.
pub const SUITES: &[SuiteInfo] = &[
    SuiteInfo {
        name: "ordered",
        description: "Ordered class with tags; a failing test is rolled back",
        runner: run_all_tagged::<OrderedQueue>,
    },
    SuiteInfo {
        name: "inheritance",
        description: "Two-level chain with overrides, private hooks, and a retired test",
        runner: run_all_tagged::<SavingsAccount>,
    },
    SuiteInfo {
        name: "exceptions",
        description: "Exception rule: expected, sub-kind, mismatch, missing, and unexpected faults",
        runner: run_all_tagged::<ParserChecks>,
    },
    SuiteInfo {
        name: "hooks",
        description: "Before-hook and after-hook failures",
        runner: run_all_tagged::<ConnectionChecks>,
    },
];

pub fn find(name: &str) -> Option<&'static SuiteInfo> {
    SUITES.iter().find(|suite| suite.name == name)
}

// ============================================================================
// ordered
// ============================================================================

#[derive(Debug, Default, Snapshot)]
pub struct OrderedQueue {
    items: Vec<i64>,
}

impl OrderedQueue {
    fn starts_empty(&mut self) -> Raises {
        assert_true(self.items.is_empty())
    }

    fn push_two(&mut self) -> Raises {
        self.items.extend([1, 2]);
        assert_equals(2, self.items.len())
    }

    fn pop_front(&mut self) -> Raises {
        if self.items.is_empty() {
            return Err(Fault::with_message(&faults::INDEX_OUT_OF_BOUNDS, "queue is empty"));
        }
        let front = self.items.remove(0);
        assert_equals(1, front)
    }

    fn miscounts(&mut self) -> Raises {
        self.items.push(99);
        assert_equals(5, self.items.len())
    }

    fn remaining(&mut self) -> Raises {
        assert_equals(vec![2], self.items.clone())
    }
}

impl TestClass for OrderedQueue {
    fn descriptor() -> ClassDescriptor<Self> {
        ClassDescriptor::new("OrderedQueue")
            .marked(OrderingMode::Ordered)
            .constructor(OrderedQueue::default)
            .level(
                TypeLevel::new("OrderedQueue")
                    .member(MemberDecl::test_with("remaining", 4, "", OrderedQueue::remaining))
                    .member(MemberDecl::test_with("pop_front", 2, "mutating", OrderedQueue::pop_front))
                    .member(MemberDecl::test_with("miscounts", 3, "", OrderedQueue::miscounts))
                    .member(MemberDecl::test_with("push_two", 1, "mutating", OrderedQueue::push_two))
                    .member(MemberDecl::test_with("starts_empty", 0, "", OrderedQueue::starts_empty)),
            )
    }
}

// ============================================================================
// inheritance
// ============================================================================

#[derive(Debug, Default, Snapshot)]
pub struct SavingsAccount {
    balance: i64,
    audits: Vec<String>,
}

impl SavingsAccount {
    fn open(&mut self) -> Raises {
        self.balance = 100;
        Ok(())
    }

    fn deposits(&mut self) -> Raises {
        let before = self.balance;
        self.balance += 50;
        assert_equals(before + 50, self.balance)
    }

    fn account_fee(&mut self) -> Raises {
        self.balance -= 10;
        assert_equals(90, self.balance)
    }

    fn savings_fee(&mut self) -> Raises {
        assert_equals(vec!["Account".to_string()], self.audits.clone())
    }

    fn withdraws(&mut self) -> Raises {
        self.balance -= 30;
        assert_equals(vec!["Account".to_string(), "Savings".to_string()], self.audits.clone())
    }

    fn account_audit(&mut self) -> Raises {
        self.audits.push("Account".to_string());
        Ok(())
    }

    fn savings_audit(&mut self) -> Raises {
        self.audits.push("Savings".to_string());
        Ok(())
    }

    fn close_audit(&mut self) -> Raises {
        self.audits.clear();
        Ok(())
    }

    fn legacy_report(&mut self) -> Raises {
        Err(Fault::new(&faults::UNSUPPORTED_OPERATION))
    }

    fn no_report(&mut self) -> Raises {
        Ok(())
    }
}

impl TestClass for SavingsAccount {
    fn descriptor() -> ClassDescriptor<Self> {
        ClassDescriptor::new("SavingsAccount")
            .marked(OrderingMode::Unordered)
            .constructor(SavingsAccount::default)
            .level(
                TypeLevel::new("Account")
                    .member(MemberDecl::setup("open", SavingsAccount::open))
                    .member(MemberDecl::test("deposits", SavingsAccount::deposits))
                    .member(MemberDecl::test("fee", SavingsAccount::account_fee))
                    .member(MemberDecl::before("audit", &["fee", "withdraws"], SavingsAccount::account_audit).private())
                    .member(MemberDecl::test("legacy_report", SavingsAccount::legacy_report)),
            )
            .level(
                TypeLevel::new("Savings")
                    .member(MemberDecl::test("fee", SavingsAccount::savings_fee))
                    .member(MemberDecl::before("audit", &["withdraws"], SavingsAccount::savings_audit).private())
                    .member(MemberDecl::test("withdraws", SavingsAccount::withdraws))
                    .member(MemberDecl::after("close_audit", &["fee", "withdraws"], SavingsAccount::close_audit))
                    .member(MemberDecl::method("legacy_report", SavingsAccount::no_report)),
            )
    }
}

// ============================================================================
// exceptions
// ============================================================================

#[derive(Debug, Default, Snapshot)]
pub struct ParserChecks {
    expected: ExpectedException,
    parsed: Vec<i64>,
}

fn parse(input: &str) -> Result<i64, Fault> {
    if input.is_empty() {
        return Err(Fault::with_message(&faults::INVALID_ARGUMENT, "empty input"));
    }
    input
        .parse()
        .map_err(|_| Fault::with_message(&faults::INVALID_ARGUMENT, format!("not a number: {input}")))
}

impl ParserChecks {
    fn rule(&mut self) -> &mut ExpectedException {
        &mut self.expected
    }

    fn feed(&mut self, input: &str) -> Raises {
        self.parsed.push(parse(input)?);
        Ok(())
    }

    fn rejects_empty(&mut self) -> Raises {
        self.expected.expect(&faults::INVALID_ARGUMENT).expect_message("empty");
        self.feed("")
    }

    fn sub_kind_matches(&mut self) -> Raises {
        self.expected.expect(&faults::RUNTIME_ERROR);
        self.feed("x")
    }

    fn wrong_kind(&mut self) -> Raises {
        self.expected.expect(&faults::ARITHMETIC_ERROR);
        self.feed("")
    }

    fn never_raises(&mut self) -> Raises {
        self.expected.expect(&faults::INVALID_ARGUMENT);
        self.feed("42")
    }

    fn unexpected(&mut self) -> Raises {
        self.feed("forty-two")
    }

    fn accepts_digits(&mut self) -> Raises {
        self.feed("7")?;
        assert_equals(vec![7], self.parsed.clone())
    }
}

impl TestClass for ParserChecks {
    fn descriptor() -> ClassDescriptor<Self> {
        ClassDescriptor::new("ParserChecks")
            .marked(OrderingMode::Unordered)
            .constructor(ParserChecks::default)
            .level(
                TypeLevel::new("ParserChecks")
                    .member(MemberDecl::exception_rule("expected", ParserChecks::rule))
                    .member(MemberDecl::test("rejects_empty", ParserChecks::rejects_empty))
                    .member(MemberDecl::test("sub_kind_matches", ParserChecks::sub_kind_matches))
                    .member(MemberDecl::test("wrong_kind", ParserChecks::wrong_kind))
                    .member(MemberDecl::test("never_raises", ParserChecks::never_raises))
                    .member(MemberDecl::test("unexpected", ParserChecks::unexpected))
                    .member(MemberDecl::test("accepts_digits", ParserChecks::accepts_digits)),
            )
    }
}

// ============================================================================
// hooks
// ============================================================================

#[derive(Debug, Default, Snapshot)]
pub struct ConnectionChecks {
    open: bool,
}

impl ConnectionChecks {
    fn connect(&mut self) -> Raises {
        self.open = true;
        Ok(())
    }

    fn handshake(&mut self) -> Raises {
        Err(Fault::with_message(&faults::INVALID_STATE, "handshake refused"))
    }

    fn disconnect(&mut self) -> Raises {
        self.open = false;
        Ok(())
    }

    fn leak_check(&mut self) -> Raises {
        Err(Fault::with_message(&faults::IO_ERROR, "socket still open"))
    }

    fn is_open(&mut self) -> Raises {
        assert_true(self.open)
    }
}

impl TestClass for ConnectionChecks {
    fn descriptor() -> ClassDescriptor<Self> {
        ClassDescriptor::new("ConnectionChecks")
            .marked(OrderingMode::Unordered)
            .constructor(ConnectionChecks::default)
            .level(
                TypeLevel::new("ConnectionChecks")
                    .member(MemberDecl::before(
                        "connect",
                        &["query", "refused", "leaky"],
                        ConnectionChecks::connect,
                    ))
                    .member(MemberDecl::before("handshake", &["refused"], ConnectionChecks::handshake))
                    .member(MemberDecl::test("query", ConnectionChecks::is_open))
                    .member(MemberDecl::test("refused", ConnectionChecks::is_open))
                    .member(MemberDecl::test("leaky", ConnectionChecks::is_open))
                    .member(MemberDecl::after("disconnect", &["query", "leaky"], ConnectionChecks::disconnect))
                    .member(MemberDecl::after("leak_check", &["leaky"], ConnectionChecks::leak_check)),
            )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::TestResult;

    #[test]
    fn ordered_suite_runs_by_index_and_rolls_back_failures() {
        let summary = find("ordered").unwrap().run("").unwrap();
        assert_eq!(
            summary.executed(),
            ["starts_empty", "push_two", "pop_front", "miscounts", "remaining"]
        );
        assert_eq!(
            summary.result("miscounts"),
            Some(&TestResult::failure(Some("expected 5 but was 2")))
        );
        assert_eq!(summary.num_successes(), 4);
    }

    #[test]
    fn ordered_suite_filters_by_tag() {
        let summary = find("ordered").unwrap().run("mutating").unwrap();
        assert_eq!(summary.executed(), ["push_two", "pop_front"]);
        assert!(summary.all_succeeded());
    }

    #[test]
    fn inheritance_suite_succeeds() {
        let summary = find("inheritance").unwrap().run("").unwrap();
        assert_eq!(summary.executed(), ["deposits", "fee", "withdraws"]);
        assert!(summary.all_succeeded(), "{summary}");
    }

    #[test]
    fn exceptions_suite_covers_every_classification() {
        let summary = find("exceptions").unwrap().run("").unwrap();
        assert_eq!(summary.result("rejects_empty"), Some(&TestResult::success()));
        assert_eq!(summary.result("sub_kind_matches"), Some(&TestResult::success()));
        assert_eq!(
            summary.result("wrong_kind"),
            Some(&TestResult::mismatch(
                "expected ArithmeticError but InvalidArgument: empty input was raised"
            ))
        );
        assert_eq!(
            summary.result("never_raises"),
            Some(&TestResult::error(
                "expected InvalidArgument to be raised, but the test returned normally"
            ))
        );
        assert_eq!(summary.result("unexpected"), Some(&TestResult::error("InvalidArgument")));
        assert_eq!(summary.result("accepts_digits"), Some(&TestResult::success()));
    }

    #[test]
    fn hooks_suite_reports_hook_faults_as_errors() {
        let summary = find("hooks").unwrap().run("").unwrap();
        assert_eq!(summary.result("query"), Some(&TestResult::success()));
        assert_eq!(
            summary.result("refused"),
            Some(&TestResult::error("InvalidState: handshake refused"))
        );
        assert_eq!(summary.result("leaky"), Some(&TestResult::error("IoError: socket still open")));
    }
}
