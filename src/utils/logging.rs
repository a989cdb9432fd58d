use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logging setup.
pub struct LoggingConfig;

impl LoggingConfig {
    /// Initialize the tracing subscriber.
    ///
    /// Configured through the environment:
    /// - `RUST_LOG`: log level filter (error, warn, info, debug, trace)
    /// - `MINDFLOW_DEBUG`: verbose output with targets and line numbers
    pub fn init() {
        let is_debug = env::var("MINDFLOW_DEBUG").is_ok();

        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => {
                if is_debug {
                    EnvFilter::new("mindflow=debug,info")
                } else {
                    EnvFilter::new("mindflow=info,warn")
                }
            }
        };

        let fmt_layer = if is_debug {
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
        } else {
            fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();

        if is_debug {
            tracing::debug!("debug mode enabled");
        }
    }

    /// Initialize with an explicit filter string.
    pub fn init_with_filter(filter: &str) {
        tracing_subscriber::registry()
            .with(EnvFilter::new(filter))
            .with(fmt::layer())
            .init();
    }

    pub fn is_debug() -> bool {
        env::var("MINDFLOW_DEBUG").is_ok()
    }
}
