//! Console report for a [`MediaMetadata`] value.
//!
//! Sections are gated by the requested level exactly as normalization gates
//! them: basic shows file information, extended adds movie information with
//! tags grouped by taxonomy, full adds track information. Values are printed
//! verbatim with fixed unit suffixes; nothing is converted or rounded.

use crate::metadata::{
    ExtractionLevel, MediaMetadata, MetadataTag, MovieInfo, TagGroup, Taxonomy, TrackInfo,
};
use owo_colors::{AnsiColors, OwoColorize};
use std::io::{self, Write};

/// Visual options for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    /// Emit ANSI colors for section and group headers.
    pub color: bool,
}

impl ReportStyle {
    pub const PLAIN: ReportStyle = ReportStyle { color: false };
    pub const COLORED: ReportStyle = ReportStyle { color: true };

    fn paint(&self, text: &str, color: AnsiColors) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self::COLORED
    }
}

/// Writes the report for `metadata` at `level` to `out`.
pub fn render_report<W: Write>(
    out: &mut W,
    metadata: &MediaMetadata,
    level: ExtractionLevel,
    style: ReportStyle,
) -> io::Result<()> {
    render_report_with(out, metadata, level, style, Taxonomy::canonical())
}

/// Like [`render_report`], grouping tags by the given taxonomy.
pub fn render_report_with<W: Write>(
    out: &mut W,
    metadata: &MediaMetadata,
    level: ExtractionLevel,
    style: ReportStyle,
    taxonomy: Taxonomy<'_>,
) -> io::Result<()> {
    let file = &metadata.file_info;
    writeln!(out, "{}", style.paint("----- File Information -----", AnsiColors::Green))?;
    writeln!(out)?;
    writeln!(out, "Filename: {}", file.filename)?;
    writeln!(out, "Size: {} bytes", file.size)?;
    writeln!(out, "Format: {}", file.format)?;

    if level.includes_movie_info() {
        if let Some(movie) = &metadata.movie_info {
            render_movie_info(out, movie, style, taxonomy)?;
        }
    }

    if level.includes_track_info() {
        if let Some(track) = &metadata.track_info {
            render_track_info(out, track, style)?;
        }
    }

    Ok(())
}

/// Renders the report into a string.
pub fn render_report_to_string(
    metadata: &MediaMetadata,
    level: ExtractionLevel,
    style: ReportStyle,
) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render_report(&mut buf, metadata, level, style);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Writes the report to a console stream (stdout in the CLI) and flushes it.
pub fn display_metadata<W: Write>(
    out: &mut W,
    metadata: &MediaMetadata,
    level: ExtractionLevel,
    style: ReportStyle,
) -> io::Result<()> {
    render_report(out, metadata, level, style)?;
    out.flush()
}

fn render_movie_info<W: Write>(
    out: &mut W,
    movie: &MovieInfo,
    style: ReportStyle,
    taxonomy: Taxonomy<'_>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style.paint("----- Movie Information -----", AnsiColors::Yellow))?;
    writeln!(out)?;
    if !movie.title.is_empty() {
        writeln!(out, "Title: {}", movie.title)?;
    }
    writeln!(out, "Duration: {} seconds", movie.duration)?;

    for group in taxonomy.groups() {
        let tags = tags_in_group(group, &movie.tags);
        if tags.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}", style.paint(&format!("{}:", group.name), AnsiColors::Cyan))?;
        for tag in tags {
            writeln!(out, "  {}: {}", tag.name, tag.value)?;
        }
    }
    Ok(())
}

fn render_track_info<W: Write>(out: &mut W, track: &TrackInfo, style: ReportStyle) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style.paint("----- Track Information -----", AnsiColors::BrightCyan))?;
    writeln!(out)?;
    writeln!(out, "Bitrate: {} bits/s", track.bit_rate)?;

    for stream in &track.streams {
        writeln!(out)?;
        write!(out, "{} Track - Codec: {}", stream.kind.to_uppercase(), stream.codec)?;
        if !stream.resolution.is_empty() {
            write!(out, ", Resolution: {}", stream.resolution)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// The tags of `group`, in the group's declared key order.
fn tags_in_group<'t>(group: &TagGroup, tags: &'t [MetadataTag]) -> Vec<&'t MetadataTag> {
    group
        .keys
        .iter()
        .filter_map(|key| tags.iter().find(|tag| tag.name == *key))
        .collect()
}
