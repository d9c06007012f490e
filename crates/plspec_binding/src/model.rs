//! Call models: declarations with every argument resolved for marshalling.

use plspec_foundation::{Direction, DriverType, Error, ErrorKind, Result, TypeFamily};
use plspec_parser::{Argument, ConstantDecl, Declaration};
use tracing::trace;

use crate::strategy::{ExtractStep, PrepareStep, Strategy};
use crate::typemap::TypeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Name of the implicit output slot holding a function's return value.
pub const RETURN_VALUE: &str = "return_value";

/// Whether a call model invokes a function or a procedure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoutineKind {
    /// Has a return value.
    Function,
    /// Has no return value.
    Procedure,
}

/// One argument resolved against the type table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Binding {
    /// The declared argument.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub argument: Argument,
    /// Token used to allocate the placeholder.
    pub token: DriverType,
    /// Marshalling family.
    pub family: TypeFamily,
    /// Prepare/extract steps.
    pub strategy: Strategy,
}

impl Binding {
    /// Returns the argument name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.argument.name
    }

    /// Returns the argument direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.argument.direction
    }

    /// Returns true if the caller supplies a value for this binding.
    #[must_use]
    pub const fn takes_input(&self) -> bool {
        self.argument.direction.takes_input()
    }

    /// Returns true if this binding contributes to the call result.
    #[must_use]
    pub const fn produces_output(&self) -> bool {
        self.argument.direction.produces_output()
    }

    /// Returns true if the caller must supply a value (input without default).
    #[must_use]
    pub fn is_required_input(&self) -> bool {
        self.argument.is_required_input()
    }

    /// Before-call step.
    #[must_use]
    pub const fn prepare(&self) -> PrepareStep {
        self.strategy.prepare
    }

    /// After-call step.
    #[must_use]
    pub const fn extract(&self) -> ExtractStep {
        self.strategy.extract
    }
}

/// A routine ready for code emission.
///
/// Arguments keep declaration order. A function's return value is a separate
/// `out`-only binding named [`RETURN_VALUE`]; it is bound apart from the
/// positional arguments and comes first in the call result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CallModel {
    /// Function or procedure.
    pub kind: RoutineKind,
    /// Routine name as declared.
    pub name: String,
    /// Positional bindings in declaration order.
    pub arguments: Vec<Binding>,
    /// The implicit return slot for functions.
    pub return_value: Option<Binding>,
    /// The declaration this model was built from.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub declaration: Declaration,
}

impl CallModel {
    /// Number of values in the call result: the return value (if any)
    /// followed by every `out`/`in out` argument.
    #[must_use]
    pub fn result_arity(&self) -> usize {
        usize::from(self.return_value.is_some()) + self.outputs().count()
    }

    /// Number of caller-supplied inputs (`in` and `in out` arguments).
    #[must_use]
    pub fn input_arity(&self) -> usize {
        self.inputs().count()
    }

    /// Arguments the caller supplies, in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = &Binding> {
        self.arguments.iter().filter(|b| b.takes_input())
    }

    /// Arguments that come back in the result, in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = &Binding> {
        self.arguments.iter().filter(|b| b.produces_output())
    }

    /// Returns true if any binding (including the return slot) has the family.
    #[must_use]
    pub fn uses_family(&self, family: TypeFamily) -> bool {
        self.arguments
            .iter()
            .chain(&self.return_value)
            .any(|b| b.family == family)
    }
}

/// A constant passed through to emission as a literal assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ConstantModel {
    /// Constant name.
    pub name: String,
    /// Declared type, as written.
    pub type_name: String,
    /// Raw expression text.
    pub value: String,
}

impl From<ConstantDecl> for ConstantModel {
    fn from(decl: ConstantDecl) -> Self {
        Self {
            name: decl.name,
            type_name: decl.type_name,
            value: decl.value,
        }
    }
}

/// One member of a package model.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "member", rename_all = "snake_case"))]
pub enum Member {
    /// A function or procedure.
    Routine(CallModel),
    /// A constant.
    Constant(ConstantModel),
}

impl Member {
    /// Returns the member name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Routine(model) => &model.name,
            Self::Constant(constant) => &constant.name,
        }
    }

    /// Returns the call model if this member is a routine.
    #[must_use]
    pub const fn as_routine(&self) -> Option<&CallModel> {
        match self {
            Self::Routine(model) => Some(model),
            Self::Constant(_) => None,
        }
    }
}

/// Builds call models from declarations using a type table.
#[derive(Clone, Copy, Debug)]
pub struct ModelBuilder<'a> {
    types: &'a TypeMap,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder over the given type table.
    #[must_use]
    pub const fn new(types: &'a TypeMap) -> Self {
        Self { types }
    }

    /// Builds a package member from any declaration.
    ///
    /// Constants are passed through without classification; their value is
    /// emitted as written.
    ///
    /// # Errors
    /// Propagates `UnknownDataType` from classification unchanged.
    pub fn build(&self, declaration: Declaration) -> Result<Member> {
        match declaration {
            Declaration::Constant(constant) => Ok(Member::Constant(constant.into())),
            routine => self.build_routine(routine).map(Member::Routine),
        }
    }

    /// Builds a call model for a function or procedure.
    ///
    /// # Errors
    /// Returns `UnknownDataType` if any argument or return type is not in the
    /// table, and `NotARoutine` for a constant.
    pub fn build_routine(&self, declaration: Declaration) -> Result<CallModel> {
        let (kind, name, arguments, return_type) = match &declaration {
            Declaration::Function(f) => (
                RoutineKind::Function,
                f.name.clone(),
                &f.arguments,
                Some(f.return_type.as_str()),
            ),
            Declaration::Procedure(p) => (RoutineKind::Procedure, p.name.clone(), &p.arguments, None),
            Declaration::Constant(c) => {
                return Err(Error::new(ErrorKind::NotARoutine(c.name.clone())));
            }
        };

        let arguments = arguments
            .iter()
            .map(|argument| self.bind(argument.clone()))
            .collect::<Result<Vec<_>>>()?;
        let return_value = return_type
            .map(|type_name| {
                self.bind(Argument::new(RETURN_VALUE, type_name).with_direction(Direction::Out))
            })
            .transpose()?;

        trace!(
            routine = %name,
            arguments = arguments.len(),
            has_return = return_value.is_some(),
            "built call model"
        );
        Ok(CallModel {
            kind,
            name,
            arguments,
            return_value,
            declaration,
        })
    }

    /// Resolves one argument against the type table.
    ///
    /// # Errors
    /// Returns `UnknownDataType` if the argument's type is not in the table.
    pub fn bind(&self, argument: Argument) -> Result<Binding> {
        let mapping = self.types.classify(&argument.type_name)?;
        let strategy = Strategy::for_binding(mapping.family, argument.direction);
        Ok(Binding {
            argument,
            token: mapping.token,
            family: mapping.family,
            strategy,
        })
    }
}
