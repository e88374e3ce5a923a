//! Tracing subscriber setup for the endpoint binary.
//!
//! A verbosity flag pins the maximum level outright. With no flag the filter comes from
//! `RUST_LOG`, falling back to INFO when it is unset or unparsable.

use crate::cli::LogLevel;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn max_level(level: LogLevel) -> Level {
    use LogLevel::*;
    match level {
        Error => Level::ERROR,
        Warn => Level::WARN,
        Info => Level::INFO,
        Debug => Level::DEBUG,
        Trace => Level::TRACE,
    }
}

/// Configure the tracing subscriber according to CLI verbosity flags.
///
/// Precedence:
/// 1. `quiet` forces WARN+.
/// 2. `-vv` => TRACE.
/// 3. `-v`  => DEBUG.
/// 4. Else `RUST_LOG` directives, defaulting to INFO.
pub fn configure_logging(level: Option<LogLevel>) {
    let builder = tracing_subscriber::fmt();
    match level {
        Some(level) => builder.with_max_level(max_level(level)).init(),
        None => builder
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .init(),
    }
}
