//! Raw ffprobe output schema.
//!
//! Mirrors the subset of `ffprobe -print_format json -show_format -show_streams`
//! that normalization consumes. Scalar fields ffprobe may omit default to empty
//! strings; the `format` object itself is required.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawProbeResult {
    pub format: RawFormat,
    #[serde(default)]
    pub streams: Vec<RawStream>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawFormat {
    #[serde(default)]
    pub filename: String,
    /// Seconds, textual (e.g. `"12.480000"`).
    #[serde(default)]
    pub duration: String,
    /// Bytes, textual.
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub bit_rate: String,
    #[serde(default)]
    pub format_name: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawStream {
    #[serde(default)]
    pub codec_type: String,
    #[serde(default)]
    pub codec_name: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}
