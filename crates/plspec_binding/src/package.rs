//! Package pipeline: scan, parse, and build every declaration in a package.
//!
//! One bad declaration never sinks the package. Each failure is recorded with
//! its package, source position, and fragment text, and processing continues
//! with the next fragment.

use std::num::NonZeroUsize;
use std::{panic, thread};

use plspec_foundation::{Error, ErrorContext, Result};
use plspec_parser::{RawFragment, parse, scan};
use tracing::{debug, warn};

use crate::model::{Member, ModelBuilder, RoutineKind};
use crate::typemap::TypeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Every successfully built member of one package, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PackageModel {
    /// Package name as given.
    pub name: String,
    /// Name of the generated module (the lower-cased package name).
    pub module: String,
    /// Routines and constants.
    pub members: Vec<Member>,
}

impl PackageModel {
    /// Creates an empty model for the named package.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            module: name.to_lowercase(),
            name,
            members: Vec::new(),
        }
    }

    /// Number of functions.
    #[must_use]
    pub fn functions(&self) -> usize {
        self.count_routines(RoutineKind::Function)
    }

    /// Number of procedures.
    #[must_use]
    pub fn procedures(&self) -> usize {
        self.count_routines(RoutineKind::Procedure)
    }

    /// Number of constants.
    #[must_use]
    pub fn constants(&self) -> usize {
        self.members
            .iter()
            .filter(|m| matches!(m, Member::Constant(_)))
            .count()
    }

    /// Finds a member by name, ignoring case.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    fn count_routines(&self, kind: RoutineKind) -> usize {
        self.members
            .iter()
            .filter_map(Member::as_routine)
            .filter(|model| model.kind == kind)
            .count()
    }
}

/// The outcome of processing one package: what was built and what failed.
#[derive(Clone, Debug)]
pub struct PackageReport {
    /// The members that built.
    pub package: PackageModel,
    /// One contextualized error per rejected declaration.
    pub errors: Vec<Error>,
}

impl PackageReport {
    /// Returns true if every declaration built.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors rendered into a serializable form.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(Diagnostic::from).collect()
    }
}

/// A flattened, serializable error report.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostic {
    /// Package name, if known.
    pub package: Option<String>,
    /// 1-based line of the declaration.
    pub line: Option<u32>,
    /// 1-based column of the declaration.
    pub column: Option<u32>,
    /// Offending fragment text.
    pub fragment: Option<String>,
    /// Error message.
    pub message: String,
}

impl From<&Error> for Diagnostic {
    fn from(error: &Error) -> Self {
        let context = error.context.clone().unwrap_or_default();
        Self {
            package: context.package,
            line: context.line,
            column: context.column,
            fragment: context.fragment,
            message: error.kind.to_string(),
        }
    }
}

/// Processes one package specification.
///
/// Every recognized fragment is parsed and built independently. Failures are
/// collected with context; successes are kept in source order.
#[must_use]
pub fn process_package(name: &str, source: &str, types: &TypeMap) -> PackageReport {
    let builder = ModelBuilder::new(types);
    let mut package = PackageModel::new(name);
    let mut errors = Vec::new();

    for fragment in scan(source) {
        match build_fragment(&builder, &fragment) {
            Ok(member) => package.members.push(member),
            Err(err) => {
                let err = err.with_context(
                    ErrorContext::new()
                        .with_package(name)
                        .with_fragment(fragment.text.clone())
                        .with_position(fragment.span.line, fragment.span.column),
                );
                warn!(
                    package = name,
                    line = fragment.span.line,
                    error = %err,
                    "skipping declaration"
                );
                errors.push(err);
            }
        }
    }

    debug!(
        package = name,
        functions = package.functions(),
        procedures = package.procedures(),
        constants = package.constants(),
        failed = errors.len(),
        "processed package"
    );
    PackageReport { package, errors }
}

/// Processes several packages in parallel. Output order matches input order.
///
/// At most [`thread::available_parallelism`] packages are in flight at once.
#[must_use]
pub fn process_packages<N, S>(inputs: &[(N, S)], types: &TypeMap) -> Vec<PackageReport>
where
    N: AsRef<str> + Sync,
    S: AsRef<str> + Sync,
{
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let mut reports = Vec::with_capacity(inputs.len());
    for batch in inputs.chunks(workers) {
        thread::scope(|scope| {
            let handles: Vec<_> = batch
                .iter()
                .map(|(name, source)| {
                    scope.spawn(move || process_package(name.as_ref(), source.as_ref(), types))
                })
                .collect();
            reports.extend(
                handles
                    .into_iter()
                    .map(|handle| handle.join().unwrap_or_else(|panic| panic::resume_unwind(panic))),
            );
        });
    }
    reports
}

fn build_fragment(builder: &ModelBuilder<'_>, fragment: &RawFragment) -> Result<Member> {
    let declaration = parse(fragment)?;
    builder.build(declaration)
}
