//! # Constants
//!
//! Default values and configuration keys used throughout the poller.

/// Key Vault the demo reads from when `azure.keyvault.uri` is not configured
pub const DEFAULT_VAULT_URL: &str = "https://xiada-kv.vault.azure.net";

/// Secret fetched on every poll iteration
pub const DEFAULT_SECRET_NAME: &str = "my-secret";

/// Delay between printing the fetched secret and the configured value (seconds)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Required configuration key holding the injected value
pub const MY_SECRET_KEY: &str = "my.secret";

/// Optional override for the vault endpoint
pub const VAULT_URL_KEY: &str = "azure.keyvault.uri";

/// Optional override for the polled secret name
pub const SECRET_NAME_KEY: &str = "azure.keyvault.secret-name";

/// Optional override for the poll delay, in whole seconds
pub const POLL_INTERVAL_KEY: &str = "poller.interval-seconds";

/// Environment variable naming the directory that holds application config files
pub const CONFIG_DIR_ENV: &str = "APP_CONFIG_DIR";

/// Properties file; wins over the YAML files
pub const PROPERTIES_FILE: &str = "application.properties";

/// YAML config files, in precedence order
pub const YAML_FILES: [&str; 2] = ["application.yaml", "application.yml"];

/// Prefix of the line carrying the fetched secret
pub const FETCHED_SECRET_PREFIX: &str = "Secret1: ";

/// Prefix of the line carrying the configured value
pub const CONFIGURED_SECRET_PREFIX: &str = "Secret: ";

/// Default `RUST_LOG` filter when none is set
pub const DEFAULT_LOG_FILTER: &str = "keyvault_secret_poller=info";

/// OAuth scope requested for Key Vault data-plane calls
pub const KEY_VAULT_SCOPE: &str = "https://vault.azure.net/.default";
