//! Tiered media metadata model.
//!
//! A [`MediaMetadata`] value is produced once per invocation by
//! [`normalize`](normalize::normalize) and is never mutated afterwards. File
//! information is always present; movie and track information are explicit
//! optional sections attached only when the requested [`ExtractionLevel`]
//! permits, so "not requested" is never confused with "present but empty".

pub mod normalize;
pub mod taxonomy;

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use normalize::{normalize, normalize_with};
pub use taxonomy::{CANONICAL_GROUPS, TagGroup, Taxonomy};

/// How much metadata to extract and display.
///
/// Levels are ordered: everything populated at a lower level is also
/// populated, unchanged, at every higher level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ExtractionLevel {
    /// File information only.
    #[default]
    Basic,
    /// File information plus movie information and grouped tags.
    Extended,
    /// Everything, including per-stream track information.
    Full,
}

impl ExtractionLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractionLevel::Basic => "basic",
            ExtractionLevel::Extended => "extended",
            ExtractionLevel::Full => "full",
        }
    }

    pub fn includes_movie_info(self) -> bool {
        self >= ExtractionLevel::Extended
    }

    pub fn includes_track_info(self) -> bool {
        self == ExtractionLevel::Full
    }
}

impl fmt::Display for ExtractionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(ExtractionLevel::Basic),
            "extended" => Ok(ExtractionLevel::Extended),
            "full" => Ok(ExtractionLevel::Full),
            other => Err(CoreError::InvalidInput(format!(
                "unknown extraction level '{other}' (expected basic, extended or full)"
            ))),
        }
    }
}

/// Normalized metadata for one media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub file_info: FileInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_info: Option<MovieInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_info: Option<TrackInfo>,
}

/// Container-level facts, populated at every level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Base name of the probed file, without any directory part.
    pub filename: String,
    /// Size in bytes, verbatim from the probe.
    pub size: String,
    /// Container format name, e.g. `mov,mp4,m4a,3gp,3g2,mj2`.
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInfo {
    pub title: String,
    /// Duration in seconds, verbatim from the probe.
    pub duration: String,
    /// Recognized tags in taxonomy order.
    #[serde(default)]
    pub tags: Vec<MetadataTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTag {
    pub name: String,
    pub value: String,
}

impl MetadataTag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    /// Overall bit rate in bits per second, verbatim from the probe.
    pub bit_rate: String,
    #[serde(default)]
    pub streams: Vec<StreamSummary>,
}

/// One stream of the container, in probe order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSummary {
    /// 0-based position in the probe's stream list.
    pub index: usize,
    /// Codec type as reported by the probe (`video`, `audio`, `subtitle`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub codec: String,
    /// `WIDTHxHEIGHT` for video streams, empty otherwise.
    pub resolution: String,
}
