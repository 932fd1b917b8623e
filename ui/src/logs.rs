//! Browser console logging.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

/// Used when the build sets no `UI_LOG` filter.
const DEFAULT_FILTER: &str = "error,ui=debug,payloads=info";

pub fn init_logging() {
    let filter = option_env!("UI_LOG").unwrap_or(DEFAULT_FILTER);
    let env_filter = EnvFilter::new(filter);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false);

    // a second App mount must not panic on the global subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    tracing::info!(filter, "logging to the console");
}
