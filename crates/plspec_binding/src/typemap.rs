//! Type classification table.
//!
//! A [`TypeMap`] maps declared type names to a driver type token and a
//! [`TypeFamily`]. The table is plain data built by the caller and passed to
//! the model builder, so several dialects can coexist; it is never consulted
//! through global state.

use std::collections::HashMap;

use plspec_foundation::{DriverType, Error, Result, TypeFamily};

#[cfg(feature = "serde")]
use serde::Serialize;

/// The resolved marshalling information for one type name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TypeMapping {
    /// Token used to allocate a placeholder of this type.
    pub token: DriverType,
    /// Marshalling family.
    pub family: TypeFamily,
}

/// Built-in Oracle table: type name, driver token, family.
const ORACLE_TYPES: [(&str, &str, TypeFamily); 21] = [
    ("number", "NUMBER", TypeFamily::Scalar),
    ("integer", "NUMBER", TypeFamily::Scalar),
    ("pls_integer", "NUMBER", TypeFamily::Scalar),
    ("binary_integer", "NUMBER", TypeFamily::Scalar),
    ("float", "NUMBER", TypeFamily::Scalar),
    ("char", "FIXED_CHAR", TypeFamily::Scalar),
    ("nchar", "FIXED_UNICODE", TypeFamily::Scalar),
    ("varchar2", "STRING", TypeFamily::Scalar),
    ("varchar", "STRING", TypeFamily::Scalar),
    ("nvarchar2", "UNICODE", TypeFamily::Scalar),
    ("date", "DATETIME", TypeFamily::Scalar),
    ("timestamp", "TIMESTAMP", TypeFamily::Scalar),
    ("rowid", "ROWID", TypeFamily::Scalar),
    ("raw", "BINARY", TypeFamily::Scalar),
    ("long raw", "LONG_BINARY", TypeFamily::Scalar),
    ("long row", "LONG_BINARY", TypeFamily::Scalar),
    ("bfile", "BFILE", TypeFamily::Scalar),
    ("blob", "BLOB", TypeFamily::LargeObject),
    ("clob", "CLOB", TypeFamily::LargeObject),
    ("nclob", "NCLOB", TypeFamily::LargeObject),
    ("sys_refcursor", "CURSOR", TypeFamily::Cursor),
];

/// A fixed mapping from type names to driver tokens and families.
#[derive(Clone, Debug, Default)]
pub struct TypeMap {
    /// Name of the dialect this table describes.
    dialect: String,
    /// Entries keyed by normalized type name.
    entries: HashMap<String, TypeMapping>,
}

impl TypeMap {
    /// Creates an empty table for the named dialect.
    #[must_use]
    pub fn new(dialect: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            entries: HashMap::new(),
        }
    }

    /// Creates the built-in Oracle table.
    #[must_use]
    pub fn oracle() -> Self {
        ORACLE_TYPES
            .iter()
            .fold(Self::new("oracle"), |map, &(name, token, family)| {
                map.with_entry(name, token, family)
            })
    }

    /// Builder method to add or replace an entry.
    #[must_use]
    pub fn with_entry(mut self, name: &str, token: impl Into<String>, family: TypeFamily) -> Self {
        self.insert(name, token, family);
        self
    }

    /// Adds or replaces an entry. Returns the previous mapping, if any.
    pub fn insert(
        &mut self,
        name: &str,
        token: impl Into<String>,
        family: TypeFamily,
    ) -> Option<TypeMapping> {
        self.entries.insert(
            normalize_type_name(name),
            TypeMapping {
                token: DriverType::new(token),
                family,
            },
        )
    }

    /// Resolves a declared type name.
    ///
    /// Lookup ignores case, surrounding and repeated whitespace, and any
    /// precision, scale, or length suffix (`NUMBER(10, 2)` is `number`).
    ///
    /// # Errors
    /// Returns `UnknownDataType` for names outside the table. There is no
    /// fallback family.
    pub fn classify(&self, type_name: &str) -> Result<TypeMapping> {
        self.entries
            .get(&normalize_type_name(type_name))
            .cloned()
            .ok_or_else(|| Error::unknown_data_type(type_name.trim()))
    }

    /// Returns true if the type name resolves.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(&normalize_type_name(type_name))
    }

    /// Returns the dialect name.
    #[must_use]
    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(normalized name, mapping)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeMapping)> {
        self.entries.iter().map(|(name, mapping)| (name.as_str(), mapping))
    }
}

/// Normalizes a type name for lookup: drops parenthesized suffixes,
/// collapses whitespace, and lower-cases.
#[must_use]
pub fn normalize_type_name(type_name: &str) -> String {
    let mut base = String::with_capacity(type_name.len());
    let mut depth = 0usize;
    for c in type_name.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 => base.push(c),
            _ => {}
        }
    }
    base.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
