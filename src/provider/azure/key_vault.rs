//! # Azure Key Vault Client
//!
//! Reads secret values from Azure Key Vault.
//!
//! One `SecretClient` is built at startup and reused for every fetch. Each
//! fetch asks for the latest secret version; nothing is cached.

pub mod auth;
pub mod client;

use crate::provider::{SecretStore, SecretStoreError};
use anyhow::Result;
use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use azure_security_keyvault_secrets::{models::Secret, SecretClient};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, field, info, Instrument, Span};
use zeroize::Zeroizing;

use client::{construct_vault_url, create_secret_client, vault_name};

/// Azure Key Vault secret store
pub struct AzureKeyVault {
    client: SecretClient,
    vault_url: String,
}

impl std::fmt::Debug for AzureKeyVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureKeyVault")
            .field("vault_url", &self.vault_url)
            .finish_non_exhaustive()
    }
}

impl AzureKeyVault {
    /// Create a client bound to `vault` (full URL or bare vault name)
    ///
    /// # Errors
    /// Returns an error if the SDK rejects the endpoint.
    pub fn new(vault: &str, credential: Arc<dyn TokenCredential>) -> Result<Self> {
        let vault_url = construct_vault_url(vault);
        let client = create_secret_client(&vault_url, credential)?;
        info!("Azure Key Vault client bound to {}", vault_url);
        Ok(Self { client, vault_url })
    }

    /// Normalised vault URL this client talks to
    pub fn vault_url(&self) -> &str {
        &self.vault_url
    }

    async fn fetch(&self, secret_name: &str) -> Result<Zeroizing<String>, SecretStoreError> {
        // Latest version; no version parameter needed
        let response = self
            .client
            .get_secret(secret_name, None)
            .await
            .map_err(|e| classify_request_error(secret_name, e))?;

        decode_secret(secret_name, &response.into_body())
    }
}

/// Decode a get-secret response body into the secret's value
fn decode_secret(secret_name: &str, body: &[u8]) -> Result<Zeroizing<String>, SecretStoreError> {
    let secret: Secret = serde_json::from_slice(body).map_err(|source| SecretStoreError::Decode {
        name: secret_name.to_string(),
        source,
    })?;

    secret
        .value
        .map(Zeroizing::new)
        .ok_or_else(|| SecretStoreError::MissingValue {
            name: secret_name.to_string(),
        })
}

#[async_trait]
impl SecretStore for AzureKeyVault {
    async fn get_secret(&self, name: &str) -> Result<Zeroizing<String>, SecretStoreError> {
        let span = tracing::debug_span!(
            "azure.keyvault.secret.get",
            secret.name = name,
            vault.name = vault_name(&self.vault_url),
            operation.success = field::Empty,
            operation.duration_ms = field::Empty,
        );
        let start = Instant::now();

        async move {
            let result = self.fetch(name).await;
            let span = Span::current();
            span.record("operation.success", result.is_ok());
            span.record(
                "operation.duration_ms",
                u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            );
            if let Err(e) = &result {
                debug!(error = %e, "Key Vault fetch failed");
            }
            result
        }
        .instrument(span)
        .await
    }
}

fn classify_request_error(secret_name: &str, error: azure_core::Error) -> SecretStoreError {
    if is_not_found(&error.to_string()) {
        SecretStoreError::NotFound {
            name: secret_name.to_string(),
        }
    } else {
        SecretStoreError::Request {
            name: secret_name.to_string(),
            source: error,
        }
    }
}

/// Key Vault reports a missing secret as HTTP 404 with code `SecretNotFound`
fn is_not_found(message: &str) -> bool {
    message.contains("SecretNotFound") || message.contains("HttpResponse(NotFound")
}
