// ============================================================================
// vme-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING
//
// The CLI reports every failure through the vme-core error type: the core
// categories already cover what the CLI itself can hit (bad input paths,
// missing flags, I/O on stdout), so there is no CLI-specific error enum.
//
// AI-ASSISTANT-INFO: CLI result alias

use vme_core::CoreResult;

/// Result type for CLI operations.
pub type CliResult<T> = CoreResult<T>;
