//! # Initialization
//!
//! One-time startup: logging, rustls setup, configuration, then the two
//! setup steps of the poller.
//!
//! 1. Build the Azure CLI credential
//! 2. Build the Key Vault client bound to the configured vault
//!
//! Any failure here aborts startup.

use crate::config::AppConfig;
use crate::observability;
use crate::provider::azure::key_vault::auth;
use crate::provider::azure::AzureKeyVault;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything the poll loop needs, built once for the process lifetime
#[derive(Debug)]
pub struct InitializationResult {
    /// Startup configuration
    pub config: AppConfig,
    /// Key Vault client, reused for every fetch
    pub store: Arc<AzureKeyVault>,
}

/// Initialize the poller runtime
///
/// This function handles:
/// - Tracing subscriber setup
/// - rustls crypto provider setup
/// - Configuration loading
/// - Azure CLI credential creation and verification
/// - Key Vault client creation
pub async fn initialize() -> Result<InitializationResult> {
    observability::logging::init_tracing()?;

    // Required for rustls 0.23+ when no default provider is set via features
    // We use ring as the crypto provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    info!("Starting keyvault-secret-poller v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().context("Failed to load application configuration")?;
    info!(
        vault.url = %config.vault_url,
        secret.name = %config.secret_name,
        interval_secs = config.poll_interval.as_secs(),
        "Configuration loaded"
    );

    let credential = auth::create_credential()?;
    auth::verify_credential(&credential).await?;

    let store = AzureKeyVault::new(&config.vault_url, credential)?;

    info!(
        vault.url = %store.vault_url(),
        "Poller initialized, starting poll loop..."
    );

    Ok(InitializationResult {
        config,
        store: Arc::new(store),
    })
}
