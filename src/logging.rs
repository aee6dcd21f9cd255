// Logging setup - one global tracing subscriber per process

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset and debug is on
pub const DEBUG_LOG_LEVEL: &str = "debug";
/// Filter used when `RUST_LOG` is unset and debug is off
pub const DEFAULT_LOG_LEVEL: &str = "info";

fn default_directive(debug: bool) -> &'static str {
    if debug {
        DEBUG_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    }
}

/// Install the fmt subscriber. `RUST_LOG` wins over the `debug` default.
///
/// Fails if another global subscriber is already installed.
pub fn init_logging(debug: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
}
