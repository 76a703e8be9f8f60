//! Shared utilities for the wallet bridge.

pub mod logging;

pub use logging::{init_logging, LogFormat};
