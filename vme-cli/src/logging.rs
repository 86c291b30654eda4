// ============================================================================
// vme-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger initialization
//
// The application logs through the standard `log` facade with `env_logger`
// as the backend. Logs go to stderr so the console report and success
// messages on stdout stay clean.
//
// USAGE:
// - default: warnings and errors only
// - -v / --verbose: debug output from vme crates
// - RUST_LOG=...: overrides both (e.g. RUST_LOG=vme_core=trace)
//
// AI-ASSISTANT-INFO: Logging initialization for the CLI

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Level used when RUST_LOG is not set.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Initializes the global logger. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).as_str());
    let _ = Builder::from_env(env)
        .target(Target::Stderr)
        .format_timestamp(None)
        .format_module_path(verbose)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false), LevelFilter::Warn);
        assert_eq!(default_level(true), LevelFilter::Debug);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
    }
}
