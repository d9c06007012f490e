//! Scanner and declaration parser for stored-routine package specifications.
//!
//! This crate turns the text of a package specification into structured
//! declarations.
//!
//! # Architecture
//!
//! ```text
//! "create package P is function f(a in number) return clob; ... end;"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    SCANNER      │  → [RawFragment(Function, "function f(a in number) return clob;"), ...]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    PARSER       │  → Declaration::Function { name: "f", arguments: [a IN number], ... }
//! │  (+ SPLITTER)   │
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`scanner`] - Cut source into single-line declaration fragments
//! - [`splitter`] - Depth and quote aware splitting helpers
//! - [`parser`] - Fragment to declaration
//! - [`declaration`] - Declaration types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod declaration;
pub mod parser;
pub mod scanner;
pub mod splitter;

pub use declaration::{Argument, ConstantDecl, Declaration, FunctionDecl, ProcedureDecl};
pub use parser::parse;
pub use scanner::{FragmentKind, RawFragment, Scanner, package_name, scan};
pub use splitter::split_top_level;
