use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{LogConfig, LogFormat};

/// `RUST_LOG` wins when set; otherwise everything at or above `config.level`.
#[must_use]
pub fn env_filter(config: &LogConfig) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
}

/// Install the global subscriber. Call once, before the server starts.
///
/// # Errors
///
/// Fails if a global subscriber has already been installed.
pub fn init_tracing(config: &LogConfig) -> anyhow::Result<()> {
  let text = (config.format == LogFormat::Text).then(|| fmt::layer());
  let json = (config.format == LogFormat::Json).then(|| fmt::layer().json());

  tracing_subscriber::registry()
    .with(env_filter(config))
    .with(text)
    .with(json)
    .with(ErrorLayer::default())
    .try_init()?;

  Ok(())
}
