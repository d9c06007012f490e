//! The per-argument marshalling protocol.
//!
//! Every argument goes through three phases around a routine call:
//!
//! 1. **Prepare** - build the value or placeholder that gets bound.
//! 2. **Invoke** - call the routine once with all bindings in declared order.
//! 3. **Extract** - turn each placeholder into the caller-visible result.
//!
//! What happens in prepare and extract depends only on the argument's
//! [`TypeFamily`] and [`Direction`]. [`Strategy::for_binding`] is the whole
//! matrix; executors and code emitters match on its steps instead of
//! re-deriving behaviour from type names.

use plspec_foundation::{Direction, TypeFamily};

#[cfg(feature = "serde")]
use serde::Serialize;

/// What to bind before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrepareStep {
    /// Bind the caller's value directly.
    PassValue,
    /// Allocate an empty placeholder with the argument's driver token.
    Allocate,
    /// Allocate a placeholder and seed it with the caller's value.
    AllocateAndSeed,
}

/// What to do with the binding after the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExtractStep {
    /// Nothing comes back.
    Nothing,
    /// Read the placeholder's final value.
    ReadValue,
    /// Read the placeholder's locator, then read the locator's full content.
    Materialize,
    /// Wrap the returned cursor in a forward-only row iterator.
    WrapRows,
}

/// The prepare/extract pair for one argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Strategy {
    /// Before-call step.
    pub prepare: PrepareStep,
    /// After-call step.
    pub extract: ExtractStep,
}

impl Strategy {
    /// Returns the strategy for an argument of the given family and direction.
    ///
    /// Cursor placeholders are never seeded: an `in out` cursor is bound as a
    /// fresh placeholder and only its output is observed.
    #[must_use]
    pub const fn for_binding(family: TypeFamily, direction: Direction) -> Self {
        let prepare = match (direction, family) {
            (Direction::In, _) => PrepareStep::PassValue,
            (Direction::Out, _) | (Direction::InOut, TypeFamily::Cursor) => PrepareStep::Allocate,
            (Direction::InOut, TypeFamily::Scalar | TypeFamily::LargeObject) => {
                PrepareStep::AllocateAndSeed
            }
        };
        let extract = match (direction, family) {
            (Direction::In, _) => ExtractStep::Nothing,
            (Direction::Out | Direction::InOut, TypeFamily::Scalar) => ExtractStep::ReadValue,
            (Direction::Out | Direction::InOut, TypeFamily::LargeObject) => {
                ExtractStep::Materialize
            }
            (Direction::Out | Direction::InOut, TypeFamily::Cursor) => ExtractStep::WrapRows,
        };
        Self { prepare, extract }
    }

    /// Strategy for a function's return value.
    #[must_use]
    pub const fn for_return(family: TypeFamily) -> Self {
        Self::for_binding(family, Direction::Out)
    }

    /// Returns true if this strategy binds a driver placeholder.
    #[must_use]
    pub const fn uses_placeholder(self) -> bool {
        !matches!(self.prepare, PrepareStep::PassValue)
    }
}
