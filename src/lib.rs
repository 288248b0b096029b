//! Key Vault Secret Poller Library
//!
//! Core functionality for the poller binary: configuration, the secret store
//! seam with its Azure Key Vault implementation, and the poll loop.

pub mod config;
pub mod constants;
pub mod observability;
pub mod provider;
pub mod runtime;

pub use config::AppConfig;
pub use provider::{SecretStore, SecretStoreError};
pub use runtime::{PollError, SecretPoller, ShutdownSignal};
