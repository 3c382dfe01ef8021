// zoundo-cli/src/logging.rs
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count; request tracing needs debug
pub fn level_for(verbosity: u8, debug: bool) -> &'static str {
    match verbosity {
        _ if debug => "debug",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the verbosity flags.
pub fn init(verbosity: u8, debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, debug)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 2)
        .compact()
        .try_init();
}
