//! Structured logging using **tracing**.
//!
//! All diagnostics go to stderr. Stdout is reserved for the human-readable
//! analysis report, which build systems capture and show to the user.

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// This should be called *once* at the beginning of the application's runtime.
/// `json` switches to machine-readable output, `verbose` lowers the default
/// level to `debug`.
///
/// # Environment Variables
/// - `RUST_LOG`: Overrides the default filter (e.g., `RUST_LOG=inclint_core=trace`)
pub fn init_structured_logging(json: bool, verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_level(true)
        .with_target(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A second initialization (e.g. from tests) is not fatal
    let _ = if json {
        builder
            .json()
            .with_ansi(false)
            .with_current_span(true)
            .try_init()
    } else {
        builder.try_init()
    };
}

/// Logs a warning event.
pub fn log_warn(message: &str) {
    warn!(detail = %message);
}

/// Logs an info event.
pub fn log_info(message: &str) {
    info!(detail = %message);
}

/// Logs an error event.
pub fn log_error(message: &str) {
    error!(detail = %message);
}

/// Logs a custom event with a specific event name.
///
/// Maps to the appropriate log level based on the event name.
pub fn log_event(event: &str, detail: &str) {
    match event.to_uppercase().as_str() {
        "ERROR" => error!(event = %event, detail = %detail),
        "WARN" | "WARNING" => warn!(event = %event, detail = %detail),
        _ => info!(event = %event, detail = %detail),
    }
}
