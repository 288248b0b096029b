//! # Azure Key Vault Authentication
//!
//! The poller authenticates as whatever identity the local Azure CLI is logged
//! in as. There is no login flow and no alternate credential source.

use crate::constants::KEY_VAULT_SCOPE;
use anyhow::{Context, Result};
use azure_core::credentials::{TokenCredential, TokenRequestOptions};
use azure_identity::AzureCliCredential;
use std::sync::Arc;
use tracing::{debug, info};

/// Create a credential backed by the current `az login` session
pub fn create_credential() -> Result<Arc<dyn TokenCredential>> {
    info!("Using Azure CLI authentication (identity of the current `az login` session)");
    // Note: Credential constructors return Arc<Self>, coerced to the trait object here
    let credential: Arc<dyn TokenCredential> =
        AzureCliCredential::new(None).context("Failed to create AzureCliCredential")?;
    Ok(credential)
}

/// Request one Key Vault token so a missing CLI session fails at startup
/// instead of on the first poll
pub async fn verify_credential(credential: &Arc<dyn TokenCredential>) -> Result<()> {
    let scope = &[KEY_VAULT_SCOPE];
    let options = Some(TokenRequestOptions::default());
    credential
        .get_token(scope, options)
        .await
        .context("Failed to get a Key Vault access token from the Azure CLI (is `az login` done?)")?;
    debug!("Azure CLI credential issued a Key Vault token");
    Ok(())
}
