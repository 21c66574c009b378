//! Logging setup for the dirdupe binary.
//!
//! The library logs through the `log` facade only. The binary installs an
//! `env_logger` backend writing to stderr, so log lines never mix with the
//! shell's own output on stdout.
//!
//! Level selection, first match wins:
//!
//! 1. `RUST_LOG`, when set
//! 2. `--quiet`: errors only
//! 3. `-vv`: trace, `-v`: debug
//! 4. info
//!
//! Per-file "Analyzing ..." lines are emitted at debug level.

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Install the logger. Calling it again is a no-op.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    let from_env = env::var("RUST_LOG").is_ok();
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if verbose > 0 {
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} [{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
        }
    });

    if builder.try_init().is_ok() {
        log::debug!(
            "Logging initialized ({})",
            if from_env {
                "from RUST_LOG".to_string()
            } else {
                format!("level {}", determine_level(verbose, quiet))
            }
        );
    }
}

/// Map CLI flags to a level filter.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
