//! Diagnostic logging.
//!
//! Standard output carries published state, so log events go to standard error.
//! Verbosity is controlled by the `INKPAD_LOG` environment variable using the
//! `tracing-subscriber` filter syntax, such as `INKPAD_LOG=debug` or
//! `INKPAD_LOG=inkpad::history=debug`.

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "INKPAD_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the global logging subscriber.
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::logging(&e.to_string()))
}
