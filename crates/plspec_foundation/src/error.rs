//! Error types for the plspec system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::TypeFamily;

/// The main error type for plspec operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a malformed declaration error.
    #[must_use]
    pub fn malformed(message: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedDeclaration {
            message: message.into(),
            fragment: fragment.into(),
        })
    }

    /// Creates an unbalanced parentheses error.
    #[must_use]
    pub fn unbalanced(fragment: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnbalancedParentheses {
            fragment: fragment.into(),
        })
    }

    /// Creates an unknown data type error.
    #[must_use]
    pub fn unknown_data_type(type_name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownDataType(type_name.into()))
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch { expected, actual })
    }

    /// Creates a protocol mismatch error.
    #[must_use]
    pub fn protocol_mismatch(
        argument: impl Into<String>,
        expected: TypeFamily,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::ProtocolMismatch {
            argument: argument.into(),
            expected,
            actual: actual.into(),
        })
    }

    /// Creates a driver error.
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Driver(message.into()))
    }

    /// Returns true if this error came out of parsing or classification,
    /// as opposed to configuration, I/O, or a driver.
    #[must_use]
    pub const fn is_declaration_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MalformedDeclaration { .. }
                | ErrorKind::UnbalancedParentheses { .. }
                | ErrorKind::UnknownDataType(_)
                | ErrorKind::NotARoutine(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A fragment matched a keyword but its name, type, or structure
    /// could not be extracted.
    #[error("malformed declaration: {message} in `{fragment}`")]
    MalformedDeclaration {
        /// What could not be located.
        message: String,
        /// The offending fragment text.
        fragment: String,
    },

    /// Parenthesis depth never returned to zero.
    #[error("unbalanced parentheses in `{fragment}`")]
    UnbalancedParentheses {
        /// The offending fragment text.
        fragment: String,
    },

    /// A declared type is not in the type table.
    #[error("unknown data type: {0}")]
    UnknownDataType(String),

    /// A call model was requested for a constant.
    #[error("not a routine: {0}")]
    NotARoutine(String),

    /// Wrong number of caller inputs for a routine.
    #[error("arity mismatch: expected {expected} inputs, got {actual}")]
    ArityMismatch {
        /// Number of inputs the routine takes.
        expected: usize,
        /// Number of inputs supplied.
        actual: usize,
    },

    /// The driver handed back something the argument's family cannot extract.
    #[error("protocol mismatch for {argument}: expected {expected} output, got {actual}")]
    ProtocolMismatch {
        /// Argument name.
        argument: String,
        /// Family the argument was classified into.
        expected: TypeFamily,
        /// What the driver produced.
        actual: String,
    },

    /// Error reported by a database driver.
    #[error("driver error: {0}")]
    Driver(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Model serialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Package the offending declaration belongs to.
    pub package: Option<String>,
    /// Normalized text of the offending fragment.
    pub fragment: Option<String>,
    /// Line number in source.
    pub line: Option<u32>,
    /// Column number in source.
    pub column: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the package name.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Sets the fragment text.
    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(package) = &self.package {
            write!(f, "at {package}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if let Some(fragment) = &self.fragment {
            if self.package.is_some() {
                writeln!(f)?;
            }
            write!(f, "  in {fragment}")?;
        }
        Ok(())
    }
}
