//! Argument classification: direction, type family, and driver type tokens.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which way a value flows across a routine call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Value is passed into the routine. The default when no keyword is given.
    #[default]
    In,
    /// Value is produced by the routine.
    Out,
    /// Value is passed in and replaced by the routine.
    InOut,
}

impl Direction {
    /// Returns true if the caller supplies a value for this direction.
    #[must_use]
    pub const fn takes_input(self) -> bool {
        matches!(self, Self::In | Self::InOut)
    }

    /// Returns true if the routine hands a value back for this direction.
    #[must_use]
    pub const fn produces_output(self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }

    /// Returns the keyword spelling of this direction.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "in out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The marshalling category of a declared data type.
///
/// Every supported type name belongs to exactly one family, and the family
/// alone decides how a placeholder is prepared and how its value is extracted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TypeFamily {
    /// Inline values: numbers, characters, dates, row ids, raw bytes, file references.
    Scalar,
    /// Values returned as a locator that must be read to obtain the content.
    LargeObject,
    /// Server-side result sets consumed row by row.
    Cursor,
}

impl TypeFamily {
    /// All families, in declaration order.
    pub const ALL: [TypeFamily; 3] = [Self::Scalar, Self::LargeObject, Self::Cursor];

    /// Returns the name of this family.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::LargeObject => "large-object",
            Self::Cursor => "cursor",
        }
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The identifier a native client library uses to allocate an output
/// placeholder of the right kind (e.g. `NUMBER`, `CLOB`, `CURSOR`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DriverType(String);

impl DriverType {
    /// Creates a driver type token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
