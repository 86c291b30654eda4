// vme-core/tests/extract_tests.rs

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use vme_core::external::parse_probe_output;
use vme_core::*;

/// Probe executor that returns canned ffprobe JSON and records calls.
struct CannedProbe {
    output: &'static str,
    calls: RefCell<Vec<PathBuf>>,
}

impl CannedProbe {
    fn new(output: &'static str) -> Self {
        Self {
            output,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ProbeExecutor for CannedProbe {
    fn probe(&self, input_path: &Path) -> CoreResult<RawProbeResult> {
        self.calls.borrow_mut().push(input_path.to_path_buf());
        parse_probe_output(self.output.as_bytes())
    }
}

struct FailingProbe;

impl ProbeExecutor for FailingProbe {
    fn probe(&self, _input_path: &Path) -> CoreResult<RawProbeResult> {
        Err(CoreError::ProbeExecution(
            "'ffprobe' exited with exit status: 1: Invalid data found when processing input".into(),
        ))
    }
}

const PROBE_JSON: &str = r#"{
    "streams": [
        {"codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080},
        {"codec_type": "audio", "codec_name": "aac"}
    ],
    "format": {
        "filename": "/tmp/movie.mp4",
        "format_name": "mov,mp4,m4a,3gp,3g2,mj2",
        "duration": "12.480000",
        "size": "1048576",
        "bit_rate": "672164",
        "tags": {"title": "Demo", "genre": "Documentary", "unknown_key": "x"}
    }
}"#;

const NO_STREAMS_JSON: &str = r#"{
    "format": {
        "filename": "/tmp/empty.mp4",
        "format_name": "mov,mp4,m4a,3gp,3g2,mj2",
        "duration": "0.000000",
        "size": "48",
        "bit_rate": "512"
    }
}"#;

fn media_file(dir: &Path) -> PathBuf {
    let path = dir.join("movie.mp4");
    fs::write(&path, b"not really an mp4").unwrap();
    path
}

#[test]
fn test_extract_extended() {
    let dir = tempdir().unwrap();
    let input = media_file(dir.path());
    let probe = CannedProbe::new(PROBE_JSON);

    let metadata = extract_metadata(&probe, &input, ExtractionLevel::Extended).unwrap();

    assert_eq!(probe.calls.borrow().as_slice(), &[input.clone()]);
    assert_eq!(metadata.file_info.filename, "movie.mp4");
    let movie = metadata.movie_info.unwrap();
    assert_eq!(movie.title, "Demo");
    assert_eq!(
        movie.tags,
        vec![
            MetadataTag::new("title", "Demo"),
            MetadataTag::new("genre", "Documentary"),
        ]
    );
    assert!(metadata.track_info.is_none());
}

#[test]
fn test_extract_full_with_no_streams() {
    let dir = tempdir().unwrap();
    let input = media_file(dir.path());
    let probe = CannedProbe::new(NO_STREAMS_JSON);

    let metadata = extract_metadata(&probe, &input, ExtractionLevel::Full).unwrap();
    let track = metadata.track_info.unwrap();
    assert!(track.streams.is_empty());
    assert_eq!(track.bit_rate, "512");
    assert!(metadata.movie_info.unwrap().tags.is_empty());
}

#[test]
fn test_extract_missing_file_skips_probe() {
    let dir = tempdir().unwrap();
    let probe = CannedProbe::new(PROBE_JSON);

    let result = extract_metadata(&probe, &dir.path().join("absent.mp4"), ExtractionLevel::Basic);
    assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    assert!(probe.calls.borrow().is_empty());
}

#[test]
fn test_extract_propagates_probe_failure() {
    let dir = tempdir().unwrap();
    let input = media_file(dir.path());

    match extract_metadata(&FailingProbe, &input, ExtractionLevel::Full) {
        Err(CoreError::ProbeExecution(msg)) => assert!(msg.contains("Invalid data")),
        other => panic!("expected probe execution error, got {other:?}"),
    }
}

#[test]
fn test_extract_propagates_parse_failure() {
    let dir = tempdir().unwrap();
    let input = media_file(dir.path());
    let probe = CannedProbe::new("{\"streams\": []}");

    assert!(matches!(
        extract_metadata(&probe, &input, ExtractionLevel::Basic),
        Err(CoreError::ProbeParse(_))
    ));
}

#[test]
fn test_extract_is_idempotent() {
    let dir = tempdir().unwrap();
    let input = media_file(dir.path());
    let probe = CannedProbe::new(PROBE_JSON);

    let first = extract_metadata(&probe, &input, ExtractionLevel::Full).unwrap();
    let second = extract_metadata(&probe, &input, ExtractionLevel::Full).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serialize_metadata(&first, ExportFormat::Json).unwrap(),
        serialize_metadata(&second, ExportFormat::Json).unwrap()
    );
}

#[test]
fn test_extract_then_render() {
    let dir = tempdir().unwrap();
    let input = media_file(dir.path());
    let probe = CannedProbe::new(PROBE_JSON);
    let metadata = extract_metadata(&probe, &input, ExtractionLevel::Full).unwrap();

    let mut out = Vec::new();
    render_report(&mut out, &metadata, ExtractionLevel::Full, ReportStyle::PLAIN).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert!(report.contains("Filename: movie.mp4"));
    assert!(report.contains("Size: 1048576 bytes"));
    assert!(report.contains("Duration: 12.480000 seconds"));
    assert!(report.contains("Content Information:\n  title: Demo"));
    assert!(report.contains("Categorization:\n  genre: Documentary"));
    assert!(!report.contains("unknown_key"));
    assert!(report.contains("Bitrate: 672164 bits/s"));
    assert!(report.contains("VIDEO Track - Codec: h264, Resolution: 1920x1080"));
    assert!(report.contains("AUDIO Track - Codec: aac\n"));
}
