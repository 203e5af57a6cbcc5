//! Startup configuration: the optional `config.toml`, environment variables,
//! command-line overrides, and the [`SessionEnv`] record handed to the theme
//! store.

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const ENV_BASE_URL: &str = "PARLEY_BASE_URL";
pub const ENV_THEME: &str = "PARLEY_THEME";
pub const ENV_BANNER_THEME: &str = "PARLEY_BANNER_THEME";
pub const ENV_LOG_FILE: &str = "PARLEY_LOG_FILE";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of `config.toml`. Every key is optional and the file is never
/// written back.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    pub base_url: Option<String>,
    /// Initial theme id (e.g., "dark", "light", "sunset")
    pub theme: Option<String>,
    /// Banner palette name (e.g., "electric", "ocean")
    pub banner_theme: Option<String>,
    pub probe_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                warn!("no configuration directory available; using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, ConfigError> {
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "parley", "parley")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Values supplied on the command line. They beat the environment and the
/// config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub theme: Option<String>,
    pub banner_theme: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved startup settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    /// Requested theme. Unknown names are resolved by the theme store.
    pub theme: Option<String>,
    /// Requested banner palette. Unknown names fall back when resolved.
    pub banner_theme: Option<String>,
    pub probe_timeout: Duration,
    pub request_timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Merge the layers: overrides, then `env`, then `config`, then defaults.
    /// Empty strings count as unset at every layer.
    pub fn resolve<F>(overrides: &Overrides, config: &Config, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |flag: &Option<String>, var: &str, file: &Option<String>| {
            non_empty(flag.clone())
                .or_else(|| non_empty(env(var)))
                .or_else(|| non_empty(file.clone()))
        };

        let base_url = pick(&overrides.base_url, ENV_BASE_URL, &config.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let theme = pick(&overrides.theme, ENV_THEME, &config.theme);
        let banner_theme = pick(&overrides.banner_theme, ENV_BANNER_THEME, &config.banner_theme);
        let log_file = overrides
            .log_file
            .clone()
            .or_else(|| non_empty(env(ENV_LOG_FILE)).map(PathBuf::from))
            .or_else(|| config.log_file.clone());

        Settings {
            base_url,
            theme,
            banner_theme,
            probe_timeout: config
                .probe_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_PROBE_TIMEOUT),
            request_timeout: config
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            log_file,
        }
    }

    pub fn session_env(&self) -> SessionEnv {
        SessionEnv::new(EnvValues {
            theme: self.theme.clone(),
            banner_theme: self.banner_theme.clone(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvValues {
    pub theme: Option<String>,
    pub banner_theme: Option<String>,
}

/// Environment-style configuration record shared with the theme store.
///
/// Read once when the store is built. The store writes the theme id back on
/// every successful switch; everyone else only reads. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct SessionEnv {
    values: Arc<RwLock<EnvValues>>,
}

impl SessionEnv {
    pub fn new(values: EnvValues) -> Self {
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    pub fn theme(&self) -> Option<String> {
        self.snapshot().theme
    }

    pub fn banner_theme(&self) -> Option<String> {
        self.snapshot().banner_theme
    }

    pub fn snapshot(&self) -> EnvValues {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn record_theme(&self, id: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .theme = Some(id.to_string());
    }
}
