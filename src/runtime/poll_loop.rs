//! # Poll Loop
//!
//! Fetches one secret, prints it, waits, prints the configured value, repeats.
//!
//! Output per iteration, in order:
//!
//! ```text
//! Secret1: <fetched value>
//! (poll interval elapses)
//! Secret: <configured value>
//! ```
//!
//! The loop has no retry. The first fetch failure ends it, as does a failed
//! write to the output. Cancellation is checked before each fetch and raced
//! against the interval sleep; a cancelled sleep skips the pending `Secret:` line.

use crate::config::AppConfig;
use crate::constants::{CONFIGURED_SECRET_PREFIX, FETCHED_SECRET_PREFIX};
use crate::provider::{SecretStore, SecretStoreError};
use crate::runtime::shutdown::ShutdownSignal;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};
use zeroize::Zeroizing;

/// Reasons the poll loop stops with an error
#[derive(Debug, Error)]
pub enum PollError {
    /// The remote fetch failed
    #[error(transparent)]
    Fetch(#[from] SecretStoreError),

    /// Writing a poll line failed
    #[error("failed to write poll output: {0}")]
    Output(#[from] std::io::Error),
}

/// Polls one secret from a [`SecretStore`]
pub struct SecretPoller {
    store: Arc<dyn SecretStore>,
    secret_name: String,
    configured_value: Zeroizing<String>,
    interval: Duration,
}

impl std::fmt::Debug for SecretPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretPoller")
            .field("store", &self.store)
            .field("secret_name", &self.secret_name)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl SecretPoller {
    /// Create a poller that fetches `secret_name` from `store` and prints
    /// `my_secret` after each `interval`
    pub fn new(
        store: Arc<dyn SecretStore>,
        my_secret: Zeroizing<String>,
        secret_name: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            secret_name: secret_name.into(),
            configured_value: my_secret,
            interval,
        }
    }

    /// Build a poller for the secret and value named in `config`
    pub fn from_config(store: Arc<dyn SecretStore>, config: &AppConfig) -> Self {
        Self::new(
            store,
            config.my_secret.clone(),
            config.secret_name.clone(),
            config.poll_interval,
        )
    }

    /// Run until a fetch fails, output fails, or `shutdown` fires
    ///
    /// Returns `Ok(())` only on cancellation.
    ///
    /// # Errors
    /// Returns [`PollError::Fetch`] on the first failed fetch and
    /// [`PollError::Output`] if a line cannot be written.
    pub async fn run<W: Write>(
        &self,
        out: &mut W,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), PollError> {
        info!(
            secret.name = %self.secret_name,
            interval_secs = self.interval.as_secs(),
            "Starting poll loop"
        );
        let mut iteration: u64 = 0;

        loop {
            if shutdown.is_cancelled() {
                info!(iteration, "Poll loop cancelled");
                return Ok(());
            }
            iteration += 1;

            let value = self
                .store
                .get_secret(&self.secret_name)
                .await
                .inspect_err(|e| {
                    error!(iteration, error = %e, "Secret fetch failed, stopping poll loop");
                })?;
            write_line(out, FETCHED_SECRET_PREFIX, &value)?;
            drop(value);

            debug!(iteration, "Waiting {}s before next line", self.interval.as_secs());
            tokio::select! {
                () = tokio::time::sleep(self.interval) => {}
                () = shutdown.cancelled() => {
                    info!(iteration, "Poll loop cancelled while waiting");
                    return Ok(());
                }
            }

            write_line(out, CONFIGURED_SECRET_PREFIX, &self.configured_value)?;
        }
    }
}

fn write_line<W: Write>(out: &mut W, prefix: &str, value: &str) -> std::io::Result<()> {
    writeln!(out, "{prefix}{value}")?;
    out.flush()
}
