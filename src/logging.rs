//! Log setup.
//!
//! The chat UI owns the terminal, so interactive runs log to a file.
//! One-shot runs log to stderr. `RUST_LOG` overrides the configured level.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Filter used when RUST_LOG is unset.
fn default_filter(level: &str, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { level };
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nlpassist_cli={level},warn")))
}

/// Log to the configured file. Returns the file path in use, if any.
///
/// When no file can be opened logging stays disabled rather than
/// corrupting the terminal UI.
pub fn init_file_logger(config: &LogConfig, verbose: bool) -> Option<PathBuf> {
    let path = config.file_path()?;
    let file = open_log_file(&path).ok()?;

    tracing_subscriber::registry()
        .with(default_filter(&config.level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .ok()?;

    Some(path)
}

/// Log compactly to stderr.
pub fn init_stderr_logger(config: &LogConfig, verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(default_filter(&config.level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
