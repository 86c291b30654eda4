//! Core library for extracting tiered metadata from media files with ffprobe.
//!
//! This crate probes a media file, normalizes the raw probe output into a
//! leveled [`MediaMetadata`] value (basic, extended or full), and either
//! renders it as a console report or exports it to JSON or XML. Exports can be
//! uploaded to, and inputs downloaded from, an S3-compatible object store.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vme_core::{ExportFormat, ExtractionLevel, FfprobeExecutor, extract_metadata, export_metadata};
//! use std::path::Path;
//!
//! let executor = FfprobeExecutor::new();
//! let metadata = extract_metadata(&executor, Path::new("/media/movie.mp4"), ExtractionLevel::Full).unwrap();
//! let written = export_metadata(&metadata, ExportFormat::Json, Path::new(".")).unwrap();
//! println!("wrote {}", written.display());
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod external;
pub mod extract;
pub mod metadata;
pub mod presentation;
pub mod storage;

// Re-exports for public API
pub use config::{S3Config, S3Credentials};
pub use error::{CoreError, CoreResult};
pub use export::{ExportFormat, deserialize_metadata, export_metadata, output_file_name, serialize_metadata};
pub use external::{FfprobeExecutor, ProbeExecutor, RawProbeResult};
pub use extract::extract_metadata;
pub use metadata::{
    ExtractionLevel, FileInfo, MediaMetadata, MetadataTag, MovieInfo, StreamSummary, TrackInfo,
    normalize,
};
pub use presentation::{ReportStyle, display_metadata, render_report};
pub use storage::{DownloadedObject, S3Client, parse_s3_uri};
