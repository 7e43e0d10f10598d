use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the number of `-v`
/// flags given on the command line.
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(verbosity > 1)
        .without_time();

    // A second init (tests, repeated runs in one process) is harmless.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
