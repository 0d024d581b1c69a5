//! Logging setup
//!
//! `RUST_LOG` wins when set; otherwise the `[logging] level` applies to this
//! crate only. Output goes to stderr so stdout carries nothing but command
//! results.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        other => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
            if other != "pretty" {
                tracing::warn!(format = %other, "Unknown log format, using pretty");
            }
            Ok(())
        }
    }
}

fn default_directive(level: &str) -> String {
    format!("evaltrack={}", level.trim())
}
