//! Tracing subscriber setup.
//!
//! The filter comes from `PARLEY_LOG` (same syntax as `RUST_LOG`), defaulting
//! to `info`. Interactive sessions own the terminal, so they only log when a
//! file is configured.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "PARLEY_LOG";
const DEFAULT_FILTER: &str = "info";

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Append to a file; used by the interactive shell.
    File(&'a Path),
    Stderr,
    Off,
}

impl<'a> LogTarget<'a> {
    /// The interactive shell logs to `log_file` or nowhere.
    pub fn for_chat(log_file: Option<&'a Path>) -> Self {
        log_file.map_or(LogTarget::Off, LogTarget::File)
    }

    /// One-shot subcommands log to `log_file` when set, else stderr.
    pub fn for_command(log_file: Option<&'a Path>) -> Self {
        log_file.map_or(LogTarget::Stderr, LogTarget::File)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Calling this again after a subscriber is
/// installed leaves the first one in place.
pub fn init(target: LogTarget<'_>) -> io::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let _ = builder.with_writer(io::stderr).try_init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
    }
    Ok(())
}
