use std::error::Error as StdError;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter; `RUST_LOG` is consulted when it is unset.
pub const LOG_ENV: &str = "WHATSAPP_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Install a stderr subscriber. Stdout belongs to the module result.
pub fn init() -> Result<(), Box<dyn StdError + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .try_init()
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}
