//! # Azure Key Vault Client Creation
//!
//! Handles creation of the Azure Key Vault `SecretClient`.

use anyhow::{Context, Result};
use azure_core::credentials::TokenCredential;
use azure_security_keyvault_secrets::SecretClient;
use std::sync::Arc;

/// Construct vault URL from vault name
/// Supports both full URLs and vault names; the result always ends in `/`
pub fn construct_vault_url(vault: &str) -> String {
    let vault = vault.trim();
    let url = if vault.starts_with("https://") || vault.starts_with("http://") {
        vault.to_string()
    } else {
        format!("https://{vault}.vault.azure.net/")
    };

    if url.ends_with('/') {
        url
    } else {
        format!("{url}/")
    }
}

/// Extract the vault name from a vault URL for span attributes
pub fn vault_name(vault_url: &str) -> &str {
    vault_url
        .strip_prefix("https://")
        .and_then(|s| s.strip_suffix(".vault.azure.net/"))
        .unwrap_or("unknown")
}

/// Create the Key Vault secret client bound to `vault_url`
pub fn create_secret_client(
    vault_url: &str,
    credential: Arc<dyn TokenCredential>,
) -> Result<SecretClient> {
    SecretClient::new(vault_url, credential, None)
        .context("Failed to create Azure Key Vault SecretClient")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_vault_url_from_name() {
        assert_eq!(
            construct_vault_url("my-vault"),
            "https://my-vault.vault.azure.net/"
        );
    }

    #[test]
    fn test_construct_vault_url_adds_trailing_slash() {
        assert_eq!(
            construct_vault_url("https://xiada-kv.vault.azure.net"),
            "https://xiada-kv.vault.azure.net/"
        );
    }

    #[test]
    fn test_construct_vault_url_keeps_full_url() {
        assert_eq!(
            construct_vault_url("https://custom-vault.vault.azure.net/"),
            "https://custom-vault.vault.azure.net/"
        );
        assert_eq!(
            construct_vault_url("http://localhost:8080"),
            "http://localhost:8080/"
        );
    }

    #[test]
    fn test_vault_name() {
        assert_eq!(vault_name("https://xiada-kv.vault.azure.net/"), "xiada-kv");
        assert_eq!(vault_name("http://localhost:8080/"), "unknown");
    }
}
