use std::io::IsTerminal;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter, e.g.
/// `RESOURCE_PLANNER_LOG=resource_planner=debug`.
pub const LOG_ENV_VAR: &str = "RESOURCE_PLANNER_LOG";

static INIT: Once = Once::new();

/// Installs the stderr log subscriber. Later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("resource_planner=warn"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
