//! Export of [`MediaMetadata`] to JSON or XML files.
//!
//! The output file is named `<filename>-metadata.<format>` after the probed
//! file's base name. Files are written atomically: the document goes to a
//! temporary file in the destination directory which is then renamed over the
//! destination, so a failed export never leaves a partial file behind.

mod xml;

use crate::error::{CoreError, CoreResult};
use crate::metadata::MediaMetadata;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;

/// Supported export document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Xml,
}

impl ExportFormat {
    /// File extension, which is also the format's canonical name.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "xml" => Ok(ExportFormat::Xml),
            _ => Err(CoreError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Stem used when the recorded filename cannot name a file on its own.
const FALLBACK_STEM: &str = "output";

/// `<filename>-metadata.<ext>` for the given metadata and format.
///
/// A filename that is empty, `.`/`..`, or carries a path separator is
/// replaced by `output`, so the export always lands inside the output
/// directory.
pub fn output_file_name(metadata: &MediaMetadata, format: ExportFormat) -> String {
    let filename = metadata.file_info.filename.as_str();
    let stem = if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\'])
    {
        FALLBACK_STEM
    } else {
        filename
    };
    format!("{stem}-metadata.{}", format.extension())
}

/// Serializes metadata in declaration order.
pub fn serialize_metadata(metadata: &MediaMetadata, format: ExportFormat) -> CoreResult<String> {
    match format {
        ExportFormat::Json => serde_json::to_string_pretty(metadata)
            .map(|mut doc| {
                doc.push('\n');
                doc
            })
            .map_err(|e| CoreError::Serialization(e.to_string())),
        ExportFormat::Xml => xml::to_xml(metadata),
    }
}

/// Parses a document previously produced by [`serialize_metadata`].
pub fn deserialize_metadata(text: &str, format: ExportFormat) -> CoreResult<MediaMetadata> {
    match format {
        ExportFormat::Json => {
            serde_json::from_str(text).map_err(|e| CoreError::Serialization(e.to_string()))
        }
        ExportFormat::Xml => xml::from_xml(text),
    }
}

/// Writes `metadata` into `output_dir` and returns the path of the new file.
///
/// An existing file at the destination is replaced.
pub fn export_metadata(
    metadata: &MediaMetadata,
    format: ExportFormat,
    output_dir: &Path,
) -> CoreResult<PathBuf> {
    let document = serialize_metadata(metadata, format)?;
    let destination = output_dir.join(output_file_name(metadata, format));
    write_atomically(&destination, document.as_bytes())?;

    log::info!(
        "Exported {} metadata to {}",
        format.extension().to_uppercase(),
        destination.display()
    );
    Ok(destination)
}

fn write_atomically(destination: &Path, contents: &[u8]) -> CoreResult<()> {
    let write_error = |source: std::io::Error| CoreError::Write {
        path: destination.to_path_buf(),
        source,
    };

    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(contents).map_err(write_error)?;
    temp.flush().map_err(write_error)?;
    temp.persist(destination).map_err(|e| write_error(e.error))?;
    Ok(())
}
