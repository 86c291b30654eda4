//! Probe-then-normalize entry point.

use crate::error::{CoreError, CoreResult};
use crate::external::ProbeExecutor;
use crate::metadata::{ExtractionLevel, MediaMetadata, normalize};
use std::path::Path;

/// Extracts metadata from the media file at `input_path`.
///
/// The path must point to an existing file; the raw probe result lives only
/// for the duration of this call.
pub fn extract_metadata<E: ProbeExecutor + ?Sized>(
    executor: &E,
    input_path: &Path,
    level: ExtractionLevel,
) -> CoreResult<MediaMetadata> {
    if !input_path.is_file() {
        return Err(CoreError::InvalidInput(format!(
            "input file not found: {}",
            input_path.display()
        )));
    }

    log::info!("Extracting {} metadata from {}", level, input_path.display());
    let raw = executor.probe(input_path)?;
    log::debug!(
        "Probe reported {} stream(s) and {} tag(s)",
        raw.streams.len(),
        raw.format.tags.len()
    );

    Ok(normalize(&raw, level))
}
