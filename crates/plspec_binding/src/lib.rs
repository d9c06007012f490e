//! Type classification and call models for plspec.
//!
//! This crate resolves parsed declarations into call models that a code
//! emitter or an executor can consume without knowing anything about type
//! names.
//!
//! # Modules
//!
//! - [`typemap`] - Declared type name to driver token and family
//! - [`strategy`] - Family and direction to prepare/extract steps
//! - [`model`] - Bindings, call models, and the model builder
//! - [`package`] - Whole-package pipeline with per-declaration diagnostics

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod model;
pub mod package;
pub mod strategy;
pub mod typemap;

pub use model::{
    Binding, CallModel, ConstantModel, Member, ModelBuilder, RETURN_VALUE, RoutineKind,
};
pub use package::{Diagnostic, PackageModel, PackageReport, process_package, process_packages};
pub use strategy::{ExtractStep, PrepareStep, Strategy};
pub use typemap::{TypeMap, TypeMapping, normalize_type_name};
