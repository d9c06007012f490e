//! Output model serialization.
//!
//! The output model is written either as pretty-printed JSON or as
//! `MessagePack` with named fields.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use plspec_foundation::{Error, ErrorKind, Result};

use crate::config::OutputFormat;
use crate::generate::GeneratorOutput;

/// Serializes the output model to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(output: &GeneratorOutput) -> Result<String> {
    serde_json::to_string_pretty(output)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Serializes the output model to `MessagePack`.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_msgpack(output: &GeneratorOutput) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(output)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Serializes the output model in the given format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(output: &GeneratorOutput, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => to_json(output).map(|mut json| {
            json.push('\n');
            json.into_bytes()
        }),
        OutputFormat::Msgpack => to_msgpack(output),
    }
}

/// Writes the output model to any writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_to<W: Write>(output: &GeneratorOutput, format: OutputFormat, mut writer: W) -> Result<()> {
    let bytes = to_bytes(output, format)?;
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| Error::new(ErrorKind::IoError(format!("failed to write output: {e}"))))
}

/// Saves the output model to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(
    output: &GeneratorOutput,
    format: OutputFormat,
    path: P,
) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to create file '{}': {e}",
            path.as_ref().display()
        )))
    })?;
    write_to(output, format, BufWriter::new(file))
}
