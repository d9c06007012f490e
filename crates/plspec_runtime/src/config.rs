//! Generator configuration.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! schema = "TESTS"
//! packages = ["TEST_PACKAGE", "BILLING"]
//! format = "json"
//!
//! [[types]]
//! name = "xmltype"
//! token = "CLOB"
//! family = "large_object"
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use plspec_binding::TypeMap;
use plspec_foundation::{Error, ErrorKind, Result, TypeFamily};
use serde::{Deserialize, Serialize};

/// Output encoding for the generated model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// `MessagePack` with named fields.
    #[serde(alias = "messagepack")]
    Msgpack,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "msgpack" | "messagepack" => Ok(Self::Msgpack),
            other => Err(Error::new(ErrorKind::Config(format!(
                "unknown output format: {other}"
            )))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Msgpack => write!(f, "msgpack"),
        }
    }
}

/// An extra or replacement entry for the type table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOverride {
    /// Declared type name.
    pub name: String,
    /// Driver type token.
    pub token: String,
    /// Marshalling family.
    pub family: TypeFamily,
}

/// Configuration for a generator run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Packages to process, matched ignoring case. Empty means all.
    pub packages: Vec<String>,

    /// Schema label copied into the output.
    pub schema: Option<String>,

    /// Output encoding.
    pub format: OutputFormat,

    /// Entries layered over the built-in type table.
    pub types: Vec<TypeOverride>,
}

impl GeneratorConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the text is not valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::new(ErrorKind::Config(e.to_string())))
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an `IoError` if the file cannot be read, or a `Config` error
    /// if its contents are invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::new(ErrorKind::IoError(format!(
                "failed to read config '{}': {e}",
                path.as_ref().display()
            )))
        })?;
        Self::from_toml_str(&text)
    }

    /// Builder method to set the package allow-list.
    #[must_use]
    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the schema label.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Builder method to set the output format.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder method to add a type table entry.
    #[must_use]
    pub fn with_type(
        mut self,
        name: impl Into<String>,
        token: impl Into<String>,
        family: TypeFamily,
    ) -> Self {
        self.types.push(TypeOverride {
            name: name.into(),
            token: token.into(),
            family,
        });
        self
    }

    /// Returns true if the named package should be processed.
    #[must_use]
    pub fn includes(&self, package: &str) -> bool {
        self.packages.is_empty()
            || self
                .packages
                .iter()
                .any(|p| p.eq_ignore_ascii_case(package))
    }

    /// Builds the type table: the built-in Oracle table plus overrides.
    #[must_use]
    pub fn type_map(&self) -> TypeMap {
        self.types
            .iter()
            .fold(TypeMap::oracle(), |map, entry| {
                map.with_entry(&entry.name, entry.token.as_str(), entry.family)
            })
    }
}
