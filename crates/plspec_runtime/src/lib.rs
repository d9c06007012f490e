//! Configuration, output serialization, and CLI for plspec.
//!
//! This crate provides:
//! - [`GeneratorConfig`] - TOML configuration: package allow-list, schema,
//!   output format, and type table overrides
//! - [`generate`] - Runs the package pipeline over specification sources
//! - Output model serialization to JSON or `MessagePack`
//! - The `plspec` command-line tool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod generate;
pub mod serialize;

pub use config::{GeneratorConfig, OutputFormat, TypeOverride};
pub use generate::{GeneratorOutput, SpecSource, generate};
pub use serialize::{save_to_file, to_bytes, to_json, to_msgpack, write_to};
