//! Common testing utilities for poller integration tests.

use async_trait::async_trait;
use keyvault_secret_poller::{SecretStore, SecretStoreError};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;
use zeroize::Zeroizing;

/// In-memory store that replays scripted responses in order.
///
/// Once the script is exhausted every fetch reports `NotFound`.
#[derive(Debug, Default)]
pub struct ScriptedStore {
    responses: Mutex<VecDeque<Result<String, SecretStoreError>>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedStore {
    pub fn new(responses: Vec<Result<String, SecretStoreError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// A store that returns each value once, then fails.
    pub fn with_values(values: &[&str]) -> Arc<Self> {
        Self::new(values.iter().map(|v| Ok((*v).to_string())).collect())
    }

    /// Names requested so far, with the (paused) clock at request time.
    pub fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecretStore for ScriptedStore {
    async fn get_secret(&self, name: &str) -> Result<Zeroizing<String>, SecretStoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), Instant::now()));
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(result) => result.map(Zeroizing::new),
            None => Err(SecretStoreError::NotFound {
                name: name.to_string(),
            }),
        }
    }
}

/// Writer that records each completed line with the clock at write time.
#[derive(Debug, Default, Clone)]
pub struct TimedSink {
    lines: Arc<Mutex<Vec<(Instant, String)>>>,
    pending: Vec<u8>,
}

impl TimedSink {
    pub fn lines(&self) -> Vec<(Instant, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn text(&self) -> Vec<String> {
        self.lines().into_iter().map(|(_, line)| line).collect()
    }
}

impl Write for TimedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();
            self.lines.lock().unwrap().push((Instant::now(), text));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Writer that always fails, like a closed stdout.
#[derive(Debug, Default)]
pub struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "stdout closed",
        ))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
