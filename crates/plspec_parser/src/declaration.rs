//! Structured declarations produced by the parser.

use std::fmt;

use plspec_foundation::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One parsed member of a package specification.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Declaration {
    /// A stored function.
    Function(FunctionDecl),
    /// A stored procedure.
    Procedure(ProcedureDecl),
    /// A named constant.
    Constant(ConstantDecl),
}

impl Declaration {
    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Procedure(p) => &p.name,
            Self::Constant(c) => &c.name,
        }
    }

    /// Returns the arguments of a routine, or an empty slice for a constant.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        match self {
            Self::Function(f) => &f.arguments,
            Self::Procedure(p) => &p.arguments,
            Self::Constant(_) => &[],
        }
    }

    /// Returns true for functions and procedures.
    #[must_use]
    pub const fn is_routine(&self) -> bool {
        matches!(self, Self::Function(_) | Self::Procedure(_))
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(func) => {
                write!(f, "function {}", func.name)?;
                write_arguments(f, &func.arguments)?;
                write!(f, " return {}", func.return_type)
            }
            Self::Procedure(proc) => {
                write!(f, "procedure {}", proc.name)?;
                write_arguments(f, &proc.arguments)
            }
            Self::Constant(c) => {
                write!(f, "{} constant {} := {}", c.name, c.type_name, c.value)
            }
        }
    }
}

fn write_arguments(f: &mut fmt::Formatter<'_>, arguments: &[Argument]) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    write!(f, "(")?;
    for (i, arg) in arguments.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}

/// A function declaration: name, arguments, and return type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDecl {
    /// Function name as written.
    pub name: String,
    /// Declared return type, as written.
    pub return_type: String,
    /// Arguments in declaration order.
    pub arguments: Vec<Argument>,
}

/// A procedure declaration: name and arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcedureDecl {
    /// Procedure name as written.
    pub name: String,
    /// Arguments in declaration order.
    pub arguments: Vec<Argument>,
}

/// A constant declaration. The value is kept as raw expression text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstantDecl {
    /// Constant name as written.
    pub name: String,
    /// Declared type, as written.
    pub type_name: String,
    /// Expression text between the assignment and the semicolon, unevaluated.
    pub value: String,
}

/// A routine argument.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Argument {
    /// Argument name as written.
    pub name: String,
    /// Data flow direction; `In` when no keyword was given.
    pub direction: Direction,
    /// Whether the direction keyword was written out.
    pub explicit_direction: bool,
    /// Declared type, as written (may carry precision, e.g. `number(10,2)`).
    pub type_name: String,
    /// Default expression text, if the argument declares one.
    pub default_value: Option<String>,
}

impl Argument {
    /// Creates an argument with an implicit `in` direction.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::In,
            explicit_direction: false,
            type_name: type_name.into(),
            default_value: None,
        }
    }

    /// Builder method to set an explicit direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self.explicit_direction = true;
        self
    }

    /// Builder method to set a default expression.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    /// Returns true if callers must supply a value for this argument.
    #[must_use]
    pub fn is_required_input(&self) -> bool {
        self.direction.takes_input() && self.default_value.is_none()
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.explicit_direction {
            write!(f, " {}", self.direction)?;
        }
        write!(f, " {}", self.type_name)?;
        if let Some(default) = &self.default_value {
            write!(f, " := {default}")?;
        }
        Ok(())
    }
}
