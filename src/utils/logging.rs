//! Diagnostic logging setup.
//!
//! The chat interface owns the terminal, so its logs go to a file or
//! nowhere. One-shot commands log warnings to stderr, or to the file given
//! with `--log`. `RUST_LOG` overrides the default level in every case.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Disabled,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    pub fn for_interactive(log_file: Option<String>) -> Self {
        match log_file {
            Some(path) => LogTarget::File(PathBuf::from(path)),
            None => LogTarget::Disabled,
        }
    }

    /// `health` and `say` log warnings to stderr unless `--log` names a file.
    pub fn for_one_shot(log_flag: Option<String>) -> Self {
        match log_flag.filter(|path| !path.trim().is_empty()) {
            Some(path) => LogTarget::File(PathBuf::from(path)),
            None => LogTarget::Stderr,
        }
    }

    fn default_directive(&self) -> &'static str {
        match self {
            LogTarget::File(_) => "moodbot=debug,info",
            LogTarget::Stderr | LogTarget::Disabled => "warn",
        }
    }
}

pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

pub fn init_tracing(target: &LogTarget) -> Result<(), Box<dyn Error>> {
    let filter = env_filter(target.default_directive());
    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|err| err.to_string())?;
            Ok(())
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|err| format!("Cannot open log file {}: {err}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|err| err.to_string())?;
            Ok(())
        }
    }
}
