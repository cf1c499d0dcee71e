//! Log output for recoverable problems (unreadable locale files, source files
//! that fail to parse, bad ignore patterns).
//!
//! Log lines go to stderr so they never mix with the report on stdout.

use std::io::{self, IsTerminal};

use tracing_subscriber::filter::LevelFilter;

/// Install the global subscriber. `WARN` by default, `DEBUG` when verbose.
///
/// Calling this twice is harmless; the second call keeps the first subscriber.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(use_ansi())
        .with_target(false)
        .without_time()
        .try_init();
}

fn use_ansi() -> bool {
    std::env::var_os("NO_COLOR").is_none() && io::stderr().is_terminal()
}
