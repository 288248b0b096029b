//! # Runtime Module
//!
//! Runtime components for the poller: initialization, the poll loop and
//! shutdown signalling.

pub mod initialization;
pub mod poll_loop;
pub mod shutdown;

pub use initialization::*;
pub use poll_loop::*;
pub use shutdown::{ShutdownSignal, ShutdownTrigger};
