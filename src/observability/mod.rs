//! # Observability
//!
//! Diagnostic logging for the poller. Poll output itself goes to stdout
//! unadorned; everything emitted through `tracing` goes to stderr.

pub mod logging;
