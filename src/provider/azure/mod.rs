//! # Azure Providers
//!
//! - `key_vault`: Azure Key Vault Secrets

pub mod key_vault;

pub use key_vault::AzureKeyVault;
