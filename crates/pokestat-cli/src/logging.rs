//! Log subscriber setup.
//!
//! `RUST_LOG` takes precedence over the verbosity flag.

use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logs to stderr, leaving stdout to the command output.
pub fn init_stderr(verbose: bool) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init()
        .context("Failed to install log subscriber")
}

/// Logs to `path`, for commands that own the terminal.
pub fn init_file(verbose: bool, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(layer)
        .try_init()
        .context("Failed to install log subscriber")
}
