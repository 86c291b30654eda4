// ============================================================================
// vme-cli/src/cli.rs
// ============================================================================
//
// COMMAND-LINE INTERFACE: Argument Definitions
//
// This module defines the command-line argument structure for the vme tool
// using clap's derive API. The tool has a single operation, so there are no
// subcommands: one INPUT plus flags selecting the extraction level, the
// output mode and the optional object store.
//
// KEY COMPONENTS:
// - Cli: Top-level argument structure
// - Level flags (-b/-e/-f) grouped so at most one can be given
// - S3 options, with --s3-upload requiring an export format and a bucket
//
// AI-ASSISTANT-INFO: Command-line argument definitions for vme

use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;
use vme_core::ExtractionLevel;
use vme_core::config::DEFAULT_S3_REGION;
use vme_core::external::DEFAULT_FFPROBE;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vme: Video metadata extractor",
    long_about = "Extracts basic, extended or full metadata from MP4 files using ffprobe, \
                  and prints it or exports it as JSON/XML, optionally to S3."
)]
#[command(group(ArgGroup::new("level").args(["basic", "extended", "full"])))]
pub struct Cli {
    /// Local media file or s3://bucket/key URI
    #[arg(required = true, value_name = "INPUT")]
    pub input: String,

    // ---- Extraction level ----
    /// Extract basic metadata: filename, size and format (default)
    #[arg(short = 'b', long)]
    pub basic: bool,

    /// Extract extended metadata: adds title, duration and grouped tags
    #[arg(short = 'e', long)]
    pub extended: bool,

    /// Extract full metadata: adds overall bitrate and per-stream details
    #[arg(short = 'f', long)]
    pub full: bool,

    // ---- Output ----
    /// Export to a file instead of printing (json or xml)
    #[arg(short = 'o', long = "output", value_name = "FORMAT")]
    pub output_format: Option<String>,

    /// Directory where the export file is written
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Path to the ffprobe binary
    #[arg(long, value_name = "PATH", env = "VME_FFPROBE", default_value = DEFAULT_FFPROBE)]
    pub ffprobe: PathBuf,

    // ---- Object store ----
    /// Upload the export file to S3 (requires --output and --s3-bucket)
    #[arg(long, requires_all = ["output_format", "s3_bucket"])]
    pub s3_upload: bool,

    /// Bucket receiving uploaded exports
    #[arg(long, value_name = "NAME")]
    pub s3_bucket: Option<String>,

    /// Region used for signing S3 requests
    #[arg(long, value_name = "REGION", default_value = DEFAULT_S3_REGION)]
    pub s3_region: String,

    /// Custom S3-compatible endpoint, e.g. http://localhost:9000
    #[arg(long, value_name = "URL")]
    pub s3_endpoint: Option<String>,

    /// Use TLS for endpoints given without a scheme
    #[arg(long, value_name = "BOOL", action = ArgAction::Set, default_value_t = true)]
    pub s3_ssl: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The requested extraction level; basic when no level flag is given.
    pub fn level(&self) -> ExtractionLevel {
        if self.full {
            ExtractionLevel::Full
        } else if self.extended {
            ExtractionLevel::Extended
        } else {
            ExtractionLevel::Basic
        }
    }
}
