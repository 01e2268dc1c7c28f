//! Declarative registration of a test class.
//!
//! Rust has neither runtime annotations nor class inheritance, so a test class describes itself once through a
//! [`ClassDescriptor`]: its test-class marker, its zero-argument constructor, and its inheritance chain as a
//! list of [`TypeLevel`]s from the root type down to the concrete type. The engine consumes only this table.
//!
//! ```rust
//! use oopunit::{ClassDescriptor, MemberDecl, OrderingMode, Raises, Snapshot, TestClass, TypeLevel};
//!
//! #[derive(Default, Snapshot)]
//! struct Counter {
//!     value: i32,
//! }
//!
//! impl Counter {
//!     fn init(&mut self) -> Raises {
//!         self.value = 1;
//!         Ok(())
//!     }
//!     fn doubles(&mut self) -> Raises {
//!         self.value *= 2;
//!         oopunit::assert_equals(2, self.value)
//!     }
//! }
//!
//! impl TestClass for Counter {
//!     fn descriptor() -> ClassDescriptor<Self> {
//!         ClassDescriptor::new("Counter")
//!             .marked(OrderingMode::Unordered)
//!             .constructor(Counter::default)
//!             .level(
//!                 TypeLevel::new("Counter")
//!                     .member(MemberDecl::setup("init", Counter::init))
//!                     .member(MemberDecl::test("doubles", Counter::doubles)),
//!             )
//!     }
//! }
//!
//! let summary = oopunit::run_all::<Counter>().unwrap();
//! assert_eq!(summary.num_successes(), 1);
//! ```

use oopunit_core::{MemberKind, OrderingMode, Role};

use crate::expectation::ExpectedException;
use crate::fault::Raises;
use crate::snapshot::Snapshot;

/// A hook or test body.
pub type MethodFn<T> = fn(&mut T) -> Raises;

/// Accessor for the subject's exception expectation holder.
pub type RuleAccessor<T> = fn(&mut T) -> &mut ExpectedException;

/// A test class: a subject type that can describe its own lifecycle members.
pub trait TestClass: Snapshot + 'static {
    fn descriptor() -> ClassDescriptor<Self>;
}

/// The class-level test marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestClassMarker {
    pub ordering: OrderingMode,
}

/// Whether a member takes part in override resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Overridable: a descendant member of the same kind and name replaces it.
    #[default]
    Public,
    /// Not overridable; same-named members elsewhere stay distinct.
    Private,
    /// Not overridable; same-named members elsewhere stay distinct.
    Static,
}

impl Visibility {
    pub const fn is_overridable(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// A lifecycle role marker together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleMarker {
    Setup,
    Before { applies_to: Vec<String> },
    Test { order: i32, tag: String },
    After { applies_to: Vec<String> },
    ExceptionRule,
}

impl RoleMarker {
    pub fn role(&self) -> Role {
        match self {
            RoleMarker::Setup => Role::Setup,
            RoleMarker::Before { .. } => Role::Before,
            RoleMarker::Test { .. } => Role::Test,
            RoleMarker::After { .. } => Role::After,
            RoleMarker::ExceptionRule => Role::ExceptionRule,
        }
    }
}

/// What a declared member is.
pub enum MemberBody<T> {
    Method(MethodFn<T>),
    Field(RuleAccessor<T>),
}

impl<T> MemberBody<T> {
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberBody::Method(_) => MemberKind::Method,
            MemberBody::Field(_) => MemberKind::Field,
        }
    }
}

// Function pointers are `Copy` for every `T`; a derive would demand `T: Clone`.
impl<T> Clone for MemberBody<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MemberBody<T> {}

impl<T> std::fmt::Debug for MemberBody<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MemberBody::{:?}", self.kind())
    }
}

/// One member declared directly on a [`TypeLevel`].
pub struct MemberDecl<T> {
    pub name: String,
    pub visibility: Visibility,
    pub marker: Option<RoleMarker>,
    pub body: MemberBody<T>,
}

impl<T> MemberDecl<T> {
    /// A member with an explicit marker and body. The catalog rejects a marker on the wrong member kind.
    pub fn new(name: impl Into<String>, marker: Option<RoleMarker>, body: MemberBody<T>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            marker,
            body,
        }
    }

    /// An unmarked method. Declaring one that overrides a marked ancestor removes the ancestor's role.
    pub fn method(name: impl Into<String>, body: MethodFn<T>) -> Self {
        Self::new(name, None, MemberBody::Method(body))
    }

    pub fn setup(name: impl Into<String>, body: MethodFn<T>) -> Self {
        Self::new(name, Some(RoleMarker::Setup), MemberBody::Method(body))
    }

    pub fn before(name: impl Into<String>, applies_to: &[&str], body: MethodFn<T>) -> Self {
        let applies_to = applies_to.iter().map(|test| (*test).to_string()).collect();
        Self::new(name, Some(RoleMarker::Before { applies_to }), MemberBody::Method(body))
    }

    /// A test with order index 0 and the empty tag.
    pub fn test(name: impl Into<String>, body: MethodFn<T>) -> Self {
        Self::test_with(name, 0, "", body)
    }

    pub fn test_with(name: impl Into<String>, order: i32, tag: impl Into<String>, body: MethodFn<T>) -> Self {
        let marker = RoleMarker::Test {
            order,
            tag: tag.into(),
        };
        Self::new(name, Some(marker), MemberBody::Method(body))
    }

    pub fn after(name: impl Into<String>, applies_to: &[&str], body: MethodFn<T>) -> Self {
        let applies_to = applies_to.iter().map(|test| (*test).to_string()).collect();
        Self::new(name, Some(RoleMarker::After { applies_to }), MemberBody::Method(body))
    }

    pub fn exception_rule(name: impl Into<String>, accessor: RuleAccessor<T>) -> Self {
        Self::new(name, Some(RoleMarker::ExceptionRule), MemberBody::Field(accessor))
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn static_member(mut self) -> Self {
        self.visibility = Visibility::Static;
        self
    }
}

impl<T> std::fmt::Debug for MemberDecl<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberDecl")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("marker", &self.marker)
            .field("body", &self.body)
            .finish()
    }
}

/// One type in the inheritance chain and the members it declares, in declaration order.
pub struct TypeLevel<T> {
    pub name: String,
    pub members: Vec<MemberDecl<T>>,
}

impl<T> TypeLevel<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, decl: MemberDecl<T>) -> Self {
        self.members.push(decl);
        self
    }
}

impl<T> std::fmt::Debug for TypeLevel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeLevel")
            .field("name", &self.name)
            .field("members", &self.members)
            .finish()
    }
}

/// The full registration table of a test class.
pub struct ClassDescriptor<T> {
    pub name: String,
    pub marker: Option<TestClassMarker>,
    pub constructor: Option<fn() -> T>,
    /// Root type first, concrete type last.
    pub levels: Vec<TypeLevel<T>>,
}

impl<T> ClassDescriptor<T> {
    /// An unmarked descriptor with no constructor and no levels.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marker: None,
            constructor: None,
            levels: Vec::new(),
        }
    }

    /// Attach the test-class marker.
    pub fn marked(mut self, ordering: OrderingMode) -> Self {
        self.marker = Some(TestClassMarker { ordering });
        self
    }

    pub fn constructor(mut self, constructor: fn() -> T) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Append the next level down the chain.
    pub fn level(mut self, level: TypeLevel<T>) -> Self {
        self.levels.push(level);
        self
    }

    /// Ordering mode of the class, if it is marked at all.
    pub fn ordering(&self) -> Option<OrderingMode> {
        self.marker.map(|marker| marker.ordering)
    }
}

impl<T> std::fmt::Debug for ClassDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name)
            .field("marker", &self.marker)
            .field("has_constructor", &self.constructor.is_some())
            .field("levels", &self.levels)
            .finish()
    }
}
