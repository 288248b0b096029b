//! # Secret Store Providers
//!
//! The poller talks to its remote store through the [`SecretStore`] trait so the
//! loop can be exercised without a live vault.
//!
//! - `azure`: Azure Key Vault, authenticated with the Azure CLI identity

pub mod azure;

use async_trait::async_trait;
use thiserror::Error;
use zeroize::Zeroizing;

/// Read access to a remote store of named secrets
#[async_trait]
pub trait SecretStore: Send + Sync + std::fmt::Debug {
    /// Fetch the current value of `name`
    ///
    /// Always goes to the remote store; implementations do not cache.
    async fn get_secret(&self, name: &str) -> Result<Zeroizing<String>, SecretStoreError>;
}

/// Secret fetch failures
///
/// None of these are retried; the poller stops on the first one.
#[derive(Debug, Error)]
pub enum SecretStoreError {
    /// The store reports no secret with this name
    #[error("secret '{name}' not found")]
    NotFound { name: String },

    /// The secret exists but has no value
    #[error("secret '{name}' has no value")]
    MissingValue { name: String },

    /// The response body could not be decoded into a secret
    #[error("failed to decode secret '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Any other transport, authentication or service error
    #[error("failed to get secret '{name}': {source}")]
    Request {
        name: String,
        #[source]
        source: azure_core::Error,
    },
}
