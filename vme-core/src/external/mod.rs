// ============================================================================
// vme-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the External Probe Tool
//
// This module encapsulates the interaction with ffprobe, the input boundary of
// the extraction pipeline. It exposes a trait so consumers and tests can supply
// their own probe implementation, a concrete implementation that spawns the
// ffprobe binary, and the raw output schema both produce.
//
// KEY COMPONENTS:
// - ProbeExecutor trait and FfprobeExecutor implementation
// - RawProbeResult schema (format block + stream list)
// - Dependency checking
//
// AI-ASSISTANT-INFO: External tool interactions and abstractions for ffprobe

use crate::error::{CoreResult, command_start_error};
use std::ffi::OsStr;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains the trait and implementation for executing ffprobe
pub mod ffprobe_executor;

/// Contains the raw ffprobe JSON schema
pub mod schema;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffprobe_executor::{DEFAULT_FFPROBE, FfprobeExecutor, ProbeExecutor, parse_probe_output};
pub use schema::{RawFormat, RawProbeResult, RawStream};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started.
///
/// Runs `<cmd_name> -version` with output discarded. Only a failure to start
/// the process counts as missing; the exit status is not inspected.
pub fn check_dependency(cmd_name: impl AsRef<OsStr>) -> CoreResult<()> {
    let cmd_name = cmd_name.as_ref();
    match Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name.to_string_lossy());
            Ok(())
        }
        Err(e) => {
            log::warn!("Dependency '{}' unavailable: {}", cmd_name.to_string_lossy(), e);
            Err(command_start_error(cmd_name.to_string_lossy(), e))
        }
    }
}
