//! Core types, errors, and values for plspec.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with package/fragment context
//! - [`Span`] - Source locations of scanned fragments
//! - [`Direction`] and [`TypeFamily`] - The argument classification axes
//! - [`DriverType`] - Driver type tokens used to allocate placeholders
//! - [`Value`] - Values exchanged with a database driver

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod span;
pub mod types;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind};
pub use span::Span;
pub use types::{Direction, DriverType, TypeFamily};
pub use value::{Row, Value};

/// Result type alias using the plspec [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
