use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "attendance=debug,store=debug,tower_http=debug,axum::rejection=trace";

/// Always enabled in the log file: bootstrap writes the only copy of the
/// generated admin password there.
const CREDENTIAL_DIRECTIVE: &str = "attendance::bootstrap=info";

/// Opens `path` for appending, creating it when missing.
pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Stdout layer filtered by `directives`, plus a plain (no ANSI) layer to
/// `file_writer` filtered by the same directives widened with
/// [`CREDENTIAL_DIRECTIVE`].
pub fn build_subscriber<W>(
    directives: &str,
    file_writer: W,
) -> Result<impl Subscriber + Send + Sync + 'static>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let console_filter = EnvFilter::try_new(directives)
        .with_context(|| format!("Invalid log filter '{}'", directives))?;
    let file_filter = EnvFilter::try_new(directives)
        .with_context(|| format!("Invalid log filter '{}'", directives))?
        .add_directive(CREDENTIAL_DIRECTIVE.parse()?);

    Ok(tracing_subscriber::registry()
        .with(fmt::layer().with_filter(console_filter))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(file_filter),
        ))
}

/// Installs the global subscriber, appending timestamped lines to `log_file`.
pub fn init_tracing(log_file: &Path) -> Result<()> {
    let file = open_log_file(log_file)?;
    let directives =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_string());

    build_subscriber(&directives, Arc::new(file))?
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
