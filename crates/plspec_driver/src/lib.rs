//! Driver seam and executor for plspec call models.
//!
//! A [`CallModel`](plspec_binding::CallModel) says how each argument is
//! marshalled. This crate carries that out against any [`Driver`]:
//!
//! ```text
//! inputs ──▶ PREPARE ──▶ INVOKE ──▶ EXTRACT ──▶ CallOutcome
//!            (bind or     (one call  (read, materialize,
//!             allocate)    by name)   or wrap in Rows)
//! ```
//!
//! # Modules
//!
//! - [`driver`] - The `Driver` and `ResultSet` traits
//! - [`execute`] - The three-phase executor
//! - [`rows`] - Lazy, fused cursor iteration
//! - [`memory`] - An in-memory scripted driver

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod driver;
pub mod execute;
pub mod memory;
pub mod rows;

pub use driver::{Bind, Driver, Fetched, ResultSet};
pub use execute::{CallOutcome, Output, execute, returns_rows};
pub use memory::{MemoryCursor, MemoryDriver, MemoryLocator, Slot, Stored};
pub use rows::Rows;
