//! Logger setup for the CLI.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Log level implied by the `-v`/`-q` flags, if any were given.
pub fn level_from_flags(verbose: u8, quiet: bool) -> Option<LevelFilter> {
    if quiet {
        return Some(LevelFilter::Error);
    }
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// Initialise `env_logger` on stderr.
///
/// Explicit flags win over `RUST_LOG`; without either, only warnings and errors are shown.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_from_flags(verbose, quiet) {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).init();
}
