//! FFprobe integration for media metadata extraction
//!
//! This module runs ffprobe against a single file, requesting JSON output with
//! format and stream sections, and parses it into a [`RawProbeResult`].
//! A failed probe is terminal: there is no retry.

use super::schema::RawProbeResult;
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Default name of the probe binary, resolved through `PATH`.
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// Trait for anything that can turn a media file into a raw probe result.
pub trait ProbeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<RawProbeResult>;
}

/// Runs the real ffprobe binary as a child process.
#[derive(Debug, Clone)]
pub struct FfprobeExecutor {
    program: OsString,
}

impl FfprobeExecutor {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_FFPROBE)
    }

    /// Uses `program` (a name on `PATH` or a path to an executable) instead of `ffprobe`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    fn command(&self, input_path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(input_path);
        cmd
    }
}

impl Default for FfprobeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeExecutor for FfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<RawProbeResult> {
        let name = self.program.to_string_lossy().into_owned();
        log::debug!("Running {} on: {}", name, input_path.display());

        let output = self
            .command(input_path)
            .output()
            .map_err(|e| command_start_error(name.as_str(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!(
                "{} failed for {}: {}",
                name,
                input_path.display(),
                stderr.trim()
            );
            return Err(command_failed_error(name, output.status, &stderr));
        }

        parse_probe_output(&output.stdout)
    }
}

/// Parses ffprobe's JSON output.
pub fn parse_probe_output(stdout: &[u8]) -> CoreResult<RawProbeResult> {
    serde_json::from_slice(stdout).map_err(|e| CoreError::ProbeParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "width": 1280,
                "height": 720,
                "pix_fmt": "yuv420p"
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio",
                "sample_rate": "48000",
                "channels": 2
            }
        ],
        "format": {
            "filename": "/media/clip.mp4",
            "nb_streams": 2,
            "format_name": "mov,mp4,m4a,3gp,3g2,mj2",
            "duration": "30.016000",
            "size": "2519811",
            "bit_rate": "671591",
            "probe_score": 100,
            "tags": {
                "major_brand": "isom",
                "title": "Clip",
                "encoder": "Lavf60.3.100"
            }
        }
    }"#;

    #[test]
    fn test_parse_sample_output() {
        let raw = parse_probe_output(SAMPLE.as_bytes()).unwrap();
        assert_eq!(raw.format.filename, "/media/clip.mp4");
        assert_eq!(raw.format.duration, "30.016000");
        assert_eq!(raw.format.size, "2519811");
        assert_eq!(raw.format.bit_rate, "671591");
        assert_eq!(raw.format.format_name, "mov,mp4,m4a,3gp,3g2,mj2");
        assert_eq!(raw.format.tags.get("title").map(String::as_str), Some("Clip"));
        assert_eq!(raw.streams.len(), 2);
        assert_eq!(raw.streams[0].width, Some(1280));
        assert_eq!(raw.streams[1].codec_type, "audio");
        assert_eq!(raw.streams[1].height, None);
    }

    #[test]
    fn test_parse_minimal_output() {
        let raw = parse_probe_output(br#"{"format": {"filename": "a.mp4"}}"#).unwrap();
        assert_eq!(raw.format.filename, "a.mp4");
        assert!(raw.format.tags.is_empty());
        assert!(raw.streams.is_empty());
        assert_eq!(raw.format.bit_rate, "");
    }

    #[test]
    fn test_parse_rejects_invalid_output() {
        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(CoreError::ProbeParse(_))
        ));
        assert!(matches!(
            parse_probe_output(b"{}"),
            Err(CoreError::ProbeParse(_))
        ));
        assert!(matches!(
            parse_probe_output(br#"{"format": {"size": 12}}"#),
            Err(CoreError::ProbeParse(_))
        ));
    }

    #[test]
    fn test_missing_program_is_execution_error() {
        let executor = FfprobeExecutor::with_program("vme-definitely-not-a-real-ffprobe");
        match executor.probe(Path::new("/tmp/whatever.mp4")) {
            Err(CoreError::ProbeExecution(msg)) => assert!(msg.contains("not found")),
            other => panic!("expected probe execution error, got {other:?}"),
        }
    }

    #[test]
    fn test_command_arguments() {
        let executor = FfprobeExecutor::new();
        let cmd = executor.command(Path::new("/tmp/in.mp4"));
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "/tmp/in.mp4"
            ]
        );
        assert_eq!(cmd.get_program(), "ffprobe");
    }
}
