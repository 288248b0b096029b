//! # Application Configuration
//!
//! Startup configuration for the poller, resolved once and immutable afterwards.
//!
//! Keys are looked up in this order, first match wins:
//! 1. Process environment with relaxed binding (`my.secret` → `MY_SECRET`),
//!    after loading an optional `.env` file
//! 2. `application.properties`
//! 3. `application.yaml` / `application.yml`
//!
//! Config files are read from `APP_CONFIG_DIR`, or the working directory when unset.

mod error;
pub mod properties;
pub mod yaml;

pub use error::ConfigError;

use crate::constants::{
    CONFIG_DIR_ENV, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SECRET_NAME, DEFAULT_VAULT_URL,
    MY_SECRET_KEY, POLL_INTERVAL_KEY, PROPERTIES_FILE, SECRET_NAME_KEY, VAULT_URL_KEY, YAML_FILES,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use zeroize::Zeroizing;

/// Immutable configuration handed to the poller at construction
#[derive(Clone)]
pub struct AppConfig {
    /// Value of `my.secret`, printed on every iteration
    pub my_secret: Zeroizing<String>,
    /// Key Vault URL or bare vault name
    pub vault_url: String,
    /// Name of the secret fetched on every iteration
    pub secret_name: String,
    /// Delay between the two output lines of an iteration
    pub poll_interval: Duration,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("my_secret", &"<redacted>")
            .field("vault_url", &self.vault_url)
            .field("secret_name", &self.secret_name)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from `.env`, the process environment and config files
    ///
    /// # Errors
    /// Returns an error if `my.secret` is unresolved, a value is invalid, or a
    /// config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv()?;
        let dir = std::env::var(CONFIG_DIR_ENV).map_or_else(|_| PathBuf::from("."), PathBuf::from);
        let sources = PropertySources::from_dir(&dir)?;
        Self::from_sources(&sources, |name| std::env::var(name).ok())
    }

    /// Resolve configuration from file-backed sources and an environment lookup
    ///
    /// `env` receives relaxed-binding variable names (e.g. `MY_SECRET`).
    ///
    /// # Errors
    /// Returns an error if `my.secret` is unresolved or a value is invalid.
    pub fn from_sources<F>(sources: &PropertySources, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| {
            env(&env_var_name(key)).or_else(|| sources.get(key).map(str::to_owned))
        };

        let my_secret = lookup(MY_SECRET_KEY)
            .map(Zeroizing::new)
            .ok_or_else(|| ConfigError::MissingProperty(MY_SECRET_KEY.to_string()))?;

        let vault_url = non_empty(VAULT_URL_KEY, lookup(VAULT_URL_KEY))?
            .unwrap_or_else(|| DEFAULT_VAULT_URL.to_string());
        let secret_name = non_empty(SECRET_NAME_KEY, lookup(SECRET_NAME_KEY))?
            .unwrap_or_else(|| DEFAULT_SECRET_NAME.to_string());

        let poll_interval = match lookup(POLL_INTERVAL_KEY) {
            None => Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidValue {
                    key: POLL_INTERVAL_KEY.to_string(),
                    value: raw,
                })?,
        };

        Ok(Self {
            my_secret,
            vault_url,
            secret_name,
            poll_interval,
        })
    }
}

fn non_empty(key: &str, value: Option<String>) -> Result<Option<String>, ConfigError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: v,
        }),
        Some(v) => Ok(Some(v.trim().to_string())),
        None => Ok(None),
    }
}

/// Map a dotted property key to its environment variable name
///
/// Upper-cases, replaces `.` with `_` and drops `-`:
/// `azure.keyvault.secret-name` → `AZURE_KEYVAULT_SECRETNAME`.
pub fn env_var_name(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '-')
        .map(|c| if c == '.' { '_' } else { c.to_ascii_uppercase() })
        .collect()
}

/// Load `.env` from the working directory without overriding set variables
fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::Dotenv(e)),
    }
}

/// Ordered file-backed property layers; earlier layers win
#[derive(Debug, Default, Clone)]
pub struct PropertySources {
    layers: Vec<PropertyLayer>,
}

#[derive(Debug, Clone)]
struct PropertyLayer {
    origin: String,
    values: HashMap<String, String>,
}

impl PropertySources {
    /// Read `application.properties` then `application.yaml`/`.yml` from `dir`
    ///
    /// Missing files are skipped.
    ///
    /// # Errors
    /// Returns an error if a file exists but cannot be read or parsed.
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let mut sources = Self::default();

        let path = dir.join(PROPERTIES_FILE);
        if let Some(content) = read_optional(&path)? {
            let values = properties::parse_properties(&content).map_err(|e| {
                ConfigError::InvalidEscape {
                    path: path.clone(),
                    line: e.line,
                }
            })?;
            sources.push(path.display().to_string(), values);
        }

        for name in YAML_FILES {
            let path = dir.join(name);
            if let Some(content) = read_optional(&path)? {
                let values = yaml::flatten_yaml(&content).map_err(|source| ConfigError::Yaml {
                    path: path.clone(),
                    source,
                })?;
                sources.push(path.display().to_string(), values);
            }
        }

        Ok(sources)
    }

    /// Append a lower-precedence layer
    pub fn push(&mut self, origin: impl Into<String>, values: HashMap<String, String>) {
        let origin = origin.into();
        info!("Loaded {} properties from {}", values.len(), origin);
        self.layers.push(PropertyLayer { origin, values });
    }

    /// First value for `key` across layers
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers.iter().find_map(|layer| {
            layer.values.get(key).map(|v| {
                debug!("Resolved '{}' from {}", key, layer.origin);
                v.as_str()
            })
        })
    }

    /// Number of loaded layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True when no config file was found
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
