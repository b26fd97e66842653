//! Structured Logging
//!
//! Logs go to stderr so stdout stays free for JSON output and CI
//! annotations.

use serde::{Deserialize, Serialize};
use std::io;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Pretty-printed for local runs
    Pretty,
    /// JSON for log collectors
    Json,
    /// Compact single-line, suited to CI logs
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        Self::Compact
    }
}

/// Default filter for the workspace crates
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "reward_cli=debug,reward_bridge=debug,reward_core=debug"
    } else {
        "reward_cli=info,reward_bridge=info,reward_core=info"
    }
}

/// Initialize logging; `RUST_LOG` overrides the default filter
pub fn init_logging(
    verbose: bool,
    format: LogFormat,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(verbose)))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(io::stderr))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init()?,
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .try_init()?,
    }

    Ok(())
}
