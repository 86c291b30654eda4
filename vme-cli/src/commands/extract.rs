// ============================================================================
// vme-cli/src/commands/extract.rs
// ============================================================================
//
// EXTRACT COMMAND: Probe one input and print or export its metadata
//
// This module wires the CLI arguments to the vme-core pipeline:
//   (download) -> probe -> normalize -> display | export (-> upload)
//
// KEY COMPONENTS:
// - run_extract: Entry point for the command
// - Input resolution for local paths and s3:// URIs
// - Terminal color detection for the console report
//
// AI-ASSISTANT-INFO: Extract command implementation

use crate::cli::Cli;
use crate::error::CliResult;
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use supports_color::Stream;
use vme_core::config::S3Config;
use vme_core::external::check_dependency;
use vme_core::storage::is_s3_uri;
use vme_core::{
    CoreError, DownloadedObject, ExportFormat, ExtractionLevel, FfprobeExecutor, MediaMetadata,
    ReportStyle, S3Client, display_metadata, export_metadata, extract_metadata, parse_s3_uri,
};

/// A probe-ready local file, plus the download guard when it came from S3.
///
/// The guard must outlive the pipeline; dropping it removes the download.
struct ResolvedInput {
    path: PathBuf,
    _download: Option<DownloadedObject>,
}

/// Runs the extract pipeline for the parsed arguments.
pub fn run_extract(args: &Cli) -> CliResult<()> {
    let level = args.level();
    let format = args
        .output_format
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()?;

    check_dependency(&args.ffprobe)?;
    let executor = FfprobeExecutor::with_program(&args.ffprobe);

    let input = resolve_input(args)?;
    let metadata = extract_metadata(&executor, &input.path, level)?;

    let Some(format) = format else {
        let style = ReportStyle { color: use_color() };
        return print_report(&mut io::stdout().lock(), &metadata, level, style);
    };

    let written = export_metadata(&metadata, format, &args.output_dir)?;
    println!(
        "{} exported metadata in {} format",
        success_label(),
        format.extension().to_uppercase()
    );
    log::info!("Wrote {}", written.display());

    if args.s3_upload {
        upload_export(args, &written)?;
    }
    Ok(())
}

/// Resolves INPUT to an absolute local path, downloading s3:// URIs first.
fn resolve_input(args: &Cli) -> CliResult<ResolvedInput> {
    if is_s3_uri(&args.input) {
        let (bucket, key) = parse_s3_uri(&args.input)?;
        let client = S3Client::new(s3_config(args, bucket))?;
        let download = client.download(&key)?;
        return Ok(ResolvedInput {
            path: download.path().to_path_buf(),
            _download: Some(download),
        });
    }

    let path = std::path::absolute(&args.input).map_err(|e| {
        CoreError::InvalidInput(format!("invalid input path '{}': {e}", args.input))
    })?;
    Ok(ResolvedInput {
        path,
        _download: None,
    })
}

fn upload_export(args: &Cli, export_path: &Path) -> CliResult<()> {
    let bucket = args
        .s3_bucket
        .clone()
        .ok_or_else(|| CoreError::InvalidInput("--s3-upload requires --s3-bucket".to_string()))?;
    let key = export_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "export path '{}' has no file name",
                export_path.display()
            ))
        })?;

    let client = S3Client::new(s3_config(args, bucket))?;
    client.upload(export_path, &key)?;
    println!(
        "{} uploaded metadata to S3 bucket {}",
        success_label(),
        client.config().bucket
    );
    Ok(())
}

/// Writes the console report. Write failures (a closed pipe, a full disk)
/// surface as I/O errors.
fn print_report<W: Write>(
    out: &mut W,
    metadata: &MediaMetadata,
    level: ExtractionLevel,
    style: ReportStyle,
) -> CliResult<()> {
    display_metadata(out, metadata, level, style)?;
    Ok(())
}

/// S3 settings from the flags, with credentials from the environment.
fn s3_config(args: &Cli, bucket: String) -> S3Config {
    S3Config::new(bucket)
        .with_region(args.s3_region.clone())
        .with_endpoint(args.s3_endpoint.clone())
        .with_ssl(args.s3_ssl)
        .with_env_credentials()
}

fn success_label() -> String {
    if use_color() {
        "Successfully".green().to_string()
    } else {
        "Successfully".to_string()
    }
}

/// Whether stdout output should be colored.
fn use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    supports_color::on(Stream::Stdout).is_some()
}
