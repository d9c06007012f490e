//! plspec - stored-routine package specification parser and call-model generator
//!
//! This crate re-exports all layers of the plspec system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: plspec_runtime   : Configuration, model serialization, CLI
//! Layer 3: plspec_driver    : Driver seam, call executor, cursor rows
//! Layer 2: plspec_binding   : Type table, strategy table, call models
//! Layer 1: plspec_parser    : Scanner, argument splitter, declaration parser
//! Layer 0: plspec_foundation: Core types (Error, Direction, TypeFamily, Value)
//! ```

pub use plspec_binding as binding;
pub use plspec_driver as driver;
pub use plspec_foundation as foundation;
pub use plspec_parser as parser;
pub use plspec_runtime as runtime;
