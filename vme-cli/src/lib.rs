// vme-cli/src/lib.rs
//
// Library portion of the vme CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::extract::run_extract;
pub use error::CliResult;
pub use logging::init_logging;
