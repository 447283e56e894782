//! Logging utilities for the calproxy service.
//!
//! Sets up the tracing subscriber once at startup; everything else logs
//! through the `tracing` macros directly.

use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber from a textual level such as `"debug"`.
///
/// Unknown levels fall back to INFO.
///
/// ```
/// use calproxy_common::logging;
///
/// logging::init_from_str("info");
/// ```
pub fn init_from_str(level: &str) {
    let parsed = level.parse::<Level>().unwrap_or(Level::INFO);
    init_with_level(parsed);
    if !level.eq_ignore_ascii_case(parsed.as_str()) {
        warn!("Unknown log level '{}', using {}", level, parsed);
    }
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured; the `calproxy=<level>` directive is added on top of it.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    match format!("calproxy={}", level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Invalid log directive for level {}: {}", level, e),
    }

    // try_init: a global subscriber may already be set (tests, embedding)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
