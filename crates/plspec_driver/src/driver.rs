//! The database driver seam.
//!
//! The executor never talks to a database directly. It drives a [`Driver`]
//! through allocate/seed/call/read steps chosen by each binding's strategy,
//! so any client library that can bind output placeholders can sit behind it.

use plspec_foundation::{DriverType, Result, Row, TypeFamily, Value};

// =============================================================================
// Driver Trait
// =============================================================================

/// A live database session able to call stored routines.
pub trait Driver {
    /// An output placeholder bound in place of a value.
    type Placeholder;
    /// A handle to large-object content held by the server.
    type Locator;
    /// A live result set returned through a cursor placeholder.
    type Cursor: ResultSet;

    /// Allocates an empty output placeholder of the given driver type.
    ///
    /// `family` says how the placeholder will be extracted, for drivers whose
    /// placeholder shape cannot be told from the token alone.
    fn allocate(&mut self, token: &DriverType, family: TypeFamily) -> Result<Self::Placeholder>;

    /// Seeds a placeholder with an input value.
    fn seed(&mut self, placeholder: &mut Self::Placeholder, value: Value) -> Result<()>;

    /// Calls a procedure by name with positional bindings.
    fn call_procedure(&mut self, name: &str, binds: &mut [Bind<Self::Placeholder>]) -> Result<()>;

    /// Calls a function by name with positional bindings, storing the return
    /// value into `returns`.
    fn call_function(
        &mut self,
        name: &str,
        returns: &mut Self::Placeholder,
        binds: &mut [Bind<Self::Placeholder>],
    ) -> Result<()>;

    /// Reads what a placeholder holds after the call.
    fn read(
        &mut self,
        placeholder: &Self::Placeholder,
    ) -> Result<Fetched<Self::Locator, Self::Cursor>>;

    /// Reads the full content behind a large-object locator.
    fn materialize(&mut self, locator: Self::Locator) -> Result<Value>;

    /// Frees a placeholder once its content has been extracted.
    ///
    /// A cursor already handed out by [`Driver::read`] stays usable.
    fn release(&mut self, placeholder: Self::Placeholder) -> Result<()>;
}

// =============================================================================
// ResultSet Trait
// =============================================================================

/// A forward-only source of rows.
pub trait ResultSet {
    /// Pulls the next row, or `None` once the result set is exhausted.
    fn next_row(&mut self) -> Result<Option<Row>>;
}

// =============================================================================
// Binding Payloads
// =============================================================================

/// One positional binding passed to a routine call.
#[derive(Clone, Debug, PartialEq)]
pub enum Bind<P> {
    /// A plain input value.
    Value(Value),
    /// A driver-managed output placeholder.
    Placeholder(P),
}

impl<P> Bind<P> {
    /// Returns the placeholder, if this binding is one.
    #[must_use]
    pub const fn placeholder(&self) -> Option<&P> {
        match self {
            Self::Placeholder(p) => Some(p),
            Self::Value(_) => None,
        }
    }

    /// Consumes the binding, returning the placeholder if it is one.
    #[must_use]
    pub fn into_placeholder(self) -> Option<P> {
        match self {
            Self::Placeholder(p) => Some(p),
            Self::Value(_) => None,
        }
    }
}

/// What a placeholder holds after a call.
#[derive(Debug)]
pub enum Fetched<L, C> {
    /// A directly readable value.
    Value(Value),
    /// A large-object locator that still has to be materialized.
    Locator(L),
    /// An open result set.
    Cursor(C),
}

impl<L, C> Fetched<L, C> {
    /// Short description of what was fetched, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Value(value) => value.kind_name(),
            Self::Locator(_) => "locator",
            Self::Cursor(_) => "cursor",
        }
    }
}
