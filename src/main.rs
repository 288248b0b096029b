//! # Key Vault Secret Poller
//!
//! Demo service that reads one secret from Azure Key Vault every 30 seconds.
//!
//! ## Overview
//!
//! 1. **Authenticate** - Uses the identity of the local Azure CLI session (`az login`)
//! 2. **Connect** - Binds a Key Vault client to `https://xiada-kv.vault.azure.net`
//! 3. **Poll** - Prints `Secret1: <value of my-secret>`, waits 30 seconds, prints
//!    `Secret: <value of my.secret>`, and repeats
//!
//! ## Configuration
//!
//! `my.secret` is required. Set it as `MY_SECRET` in the environment or a `.env`
//! file, or in `application.properties` / `application.yaml`.
//!
//! Any startup or fetch failure terminates the process. Ctrl+C or SIGTERM stops
//! the loop cleanly.

use anyhow::{Context, Result};
use keyvault_secret_poller::runtime::{initialize, shutdown, SecretPoller};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let init_result = initialize().await?;

    let (trigger, shutdown_signal) = shutdown::channel();
    tokio::spawn(shutdown::trigger_on_signal(trigger));

    let poller = SecretPoller::from_config(init_result.store, &init_result.config);
    let mut stdout = std::io::stdout();
    poller
        .run(&mut stdout, shutdown_signal)
        .await
        .context("Secret poll loop terminated")?;

    info!("Poller stopped");
    Ok(())
}
