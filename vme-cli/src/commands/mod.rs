//! Command implementations for the CLI.

/// The extract pipeline: probe one input and print or export its metadata.
pub mod extract;
