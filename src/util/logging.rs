// vpsdeals - util/logging.rs
//
// Structured logging setup. Everything goes to stderr so stdout stays
// clean for deal listings and piped exports.

use crate::util::constants;
use tracing_subscriber::EnvFilter;

/// Initialise tracing for the whole process.
///
/// The active level is resolved in priority order: the RUST_LOG
/// environment variable, then the --debug CLI flag, then the level from
/// config.toml, then "info".
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = match (std::env::var("RUST_LOG").is_ok(), debug_flag, config_level) {
        (true, _, _) => EnvFilter::from_default_env(),
        (false, true, _) => EnvFilter::new("debug"),
        (false, false, Some(level)) => EnvFilter::new(level),
        (false, false, None) => EnvFilter::new(constants::DEFAULT_LOG_LEVEL),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    tracing::debug!(
        app = constants::APP_NAME,
        version = constants::APP_VERSION,
        "Logging initialised"
    );
}
