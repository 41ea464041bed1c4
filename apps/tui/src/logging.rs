use crate::config::AppConfig;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Interactive runs log only when a log file is configured, since the
/// terminal is in raw mode on the alternate screen. Headless runs log to
/// stderr.
pub fn init_logging(config: &AppConfig, headless: bool) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;

        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| eyre!("failed to install logger: {e}"))?;
    } else if headless {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| eyre!("failed to install logger: {e}"))?;
    }

    Ok(())
}
