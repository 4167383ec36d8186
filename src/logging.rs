//! Logger setup for hosts that do not install their own.

use crate::config::LogLevel;

/// Install an `env_logger` at `level`. `RUST_LOG` still overrides it.
///
/// Safe to call more than once; only the first call installs a logger.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .try_init();

    if result.is_ok() {
        log::debug!("Logging initialised at {}", level.name());
    }
}

/// On the web the host page owns logging.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LogLevel) {
    log::set_max_level(level.to_level_filter());
}
