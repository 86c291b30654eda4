//! Raw probe result to tiered [`MediaMetadata`].
//!
//! Normalization is a pure function: no I/O, no logging, and the same input
//! at the same level always yields an equal value. Tags are emitted by walking
//! the taxonomy rather than the raw map, so their order never depends on hash
//! map iteration.

use super::taxonomy::Taxonomy;
use super::{
    ExtractionLevel, FileInfo, MediaMetadata, MetadataTag, MovieInfo, StreamSummary, TrackInfo,
};
use crate::external::{RawFormat, RawProbeResult, RawStream};
use std::path::Path;

/// Normalizes `raw` at `level` using the canonical taxonomy.
pub fn normalize(raw: &RawProbeResult, level: ExtractionLevel) -> MediaMetadata {
    normalize_with(raw, level, Taxonomy::canonical())
}

/// Normalizes `raw` at `level` using the given taxonomy.
pub fn normalize_with(
    raw: &RawProbeResult,
    level: ExtractionLevel,
    taxonomy: Taxonomy<'_>,
) -> MediaMetadata {
    MediaMetadata {
        file_info: file_info(&raw.format),
        movie_info: level
            .includes_movie_info()
            .then(|| movie_info(&raw.format, taxonomy)),
        track_info: level
            .includes_track_info()
            .then(|| track_info(&raw.format, &raw.streams)),
    }
}

fn file_info(format: &RawFormat) -> FileInfo {
    FileInfo {
        filename: base_name(&format.filename),
        size: format.size.clone(),
        format: format.format_name.clone(),
    }
}

fn movie_info(format: &RawFormat, taxonomy: Taxonomy<'_>) -> MovieInfo {
    let tags = taxonomy
        .keys()
        .filter_map(|key| {
            format
                .tags
                .get(key)
                .map(|value| MetadataTag::new(key, value.as_str()))
        })
        .collect();

    MovieInfo {
        title: format.tags.get("title").cloned().unwrap_or_default(),
        duration: format.duration.clone(),
        tags,
    }
}

fn track_info(format: &RawFormat, streams: &[RawStream]) -> TrackInfo {
    TrackInfo {
        bit_rate: format.bit_rate.clone(),
        streams: streams
            .iter()
            .enumerate()
            .map(|(index, stream)| StreamSummary {
                index,
                kind: stream.codec_type.clone(),
                codec: stream.codec_name.clone(),
                resolution: resolution(stream),
            })
            .collect(),
    }
}

/// `WIDTHxHEIGHT` for video streams with both dimensions, empty otherwise.
pub(crate) fn resolution(stream: &RawStream) -> String {
    match (stream.codec_type.as_str(), stream.width, stream.height) {
        ("video", Some(width), Some(height)) => format!("{width}x{height}"),
        _ => String::new(),
    }
}

/// Final path component of a probe filename, or the input unchanged when it
/// has none (e.g. a bare name or a URL-like filename ending in a separator).
fn base_name(filename: &str) -> String {
    Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}
