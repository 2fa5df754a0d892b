use std::{env, net::SocketAddr, str::FromStr};

use anyhow::Context;
use tracing_subscriber::filter::LevelFilter;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Output encoding of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
  /// `timestamp level target: message`
  #[default]
  Text,
  Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
  pub level: LevelFilter,
  pub format: LogFormat,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: LevelFilter::INFO,
      format: LogFormat::Text,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEnv {
  pub listen_addr: SocketAddr,
  pub log: LogConfig,
  /// Trace every scored pair. Volume grows with `n × m`, so off by default.
  pub log_pair_scores: bool,
}

impl AppEnv {
  /// Read configuration from the process environment.
  ///
  /// # Errors
  ///
  /// Fails when a variable is set to a value that cannot be parsed.
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Read configuration through `lookup`, which maps a variable name to its value.
  ///
  /// # Errors
  ///
  /// Fails when a variable is set to a value that cannot be parsed.
  pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let listen_addr: SocketAddr = lookup("LISTEN_ADDR")
      .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned())
      .parse()
      .context("LISTEN_ADDR must be a socket address such as 0.0.0.0:3000")?;

    let level = lookup("LOG_LEVEL").map_or(LevelFilter::INFO, |raw| parse_level(&raw));

    let format = lookup("LOG_FORMAT")
      .map(|raw| LogFormat::from_str(raw.trim()))
      .transpose()
      .context("LOG_FORMAT must be `text` or `json`")?
      .unwrap_or_default();

    let log_pair_scores = lookup("LOG_PAIR_SCORES")
      .map(|raw| parse_bool(&raw))
      .transpose()
      .context("LOG_PAIR_SCORES must be a boolean")?
      .unwrap_or(false);

    Ok(Self {
      listen_addr,
      log: LogConfig { level, format },
      log_pair_scores,
    })
  }
}

/// Unknown level names fall back to `INFO`.
fn parse_level(raw: &str) -> LevelFilter {
  match raw.trim().to_ascii_uppercase().as_str() {
    "WARNING" => LevelFilter::WARN,
    "CRITICAL" | "FATAL" => LevelFilter::ERROR,
    other => LevelFilter::from_str(other).unwrap_or(LevelFilter::INFO),
  }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" | "" => Ok(false),
    other => Err(anyhow::anyhow!("unrecognised boolean `{other}`")),
  }
}
