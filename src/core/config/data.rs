use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::DEFAULT_BASE_URL;
use crate::utils::url::normalize_base_url;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the classification service (e.g., "http://localhost:8000")
    pub base_url: Option<String>,
    /// File that receives diagnostic logs while the chat interface is running
    pub log_file: Option<String>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    /// Command line value first, then the config file, then the built-in service.
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> String {
        let chosen = cli_override
            .filter(|value| !value.trim().is_empty())
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);
        normalize_base_url(chosen)
    }

    pub fn resolve_log_file(&self, cli_override: Option<&str>) -> Option<String> {
        cli_override
            .map(str::to_string)
            .or_else(|| self.log_file.clone())
            .filter(|value| !value.trim().is_empty())
    }
}
