//! From specification sources to the output model.

use std::fs;
use std::path::Path;

use plspec_binding::{Diagnostic, PackageModel, process_packages};
use plspec_foundation::{Error, ErrorKind, Result};
use plspec_parser::package_name;
use serde::Serialize;
use tracing::debug;

use crate::config::GeneratorConfig;

/// The text of one package specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecSource {
    /// Package name.
    pub name: String,
    /// Specification text.
    pub text: String,
}

impl SpecSource {
    /// Creates a source, taking the package name from the text's header if it
    /// has one and from `fallback` otherwise.
    #[must_use]
    pub fn new(fallback: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        let name = package_name(&text).unwrap_or_else(|| fallback.to_string());
        Self { name, text }
    }

    /// Reads a specification file. The file stem names the package when the
    /// text has no header.
    ///
    /// # Errors
    ///
    /// Returns an `IoError` if the file cannot be read.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::IoError(format!(
                "failed to read '{}': {e}",
                path.display()
            )))
        })?;
        let stem = path
            .file_stem()
            .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
        Ok(Self::new(&stem, text))
    }
}

/// Everything a generator run produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratorOutput {
    /// Schema label from configuration.
    pub schema: Option<String>,
    /// One model per processed package, in input order.
    pub packages: Vec<PackageModel>,
    /// Every rejected declaration across all packages.
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratorOutput {
    /// Returns true if no declaration was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Processes every source the configuration selects.
#[must_use]
pub fn generate(config: &GeneratorConfig, sources: &[SpecSource]) -> GeneratorOutput {
    let types = config.type_map();
    let selected: Vec<(&str, &str)> = sources
        .iter()
        .filter(|source| config.includes(&source.name))
        .map(|source| (source.name.as_str(), source.text.as_str()))
        .collect();
    debug!(
        selected = selected.len(),
        total = sources.len(),
        "generating packages"
    );

    let mut output = GeneratorOutput {
        schema: config.schema.clone(),
        packages: Vec::with_capacity(selected.len()),
        diagnostics: Vec::new(),
    };
    for report in process_packages(&selected, &types) {
        output.diagnostics.extend(report.diagnostics());
        output.packages.push(report.package);
    }
    output
}
