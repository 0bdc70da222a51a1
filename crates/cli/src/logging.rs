use anyhow::{Context, Result};
use goodscart_core::config::{AppConfig, LogFormat};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Output goes to stderr; stdout carries
/// command results only.
pub fn init(config: &AppConfig) -> Result<()> {
    let level = config
        .logging
        .level
        .trim()
        .parse::<Level>()
        .with_context(|| format!("invalid log level `{}`", config.logging.level))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow::anyhow!(error))
    .context("failed to install tracing subscriber")
}
