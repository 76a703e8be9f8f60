//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator the bridge talks to (wallet extension, backend, page
//! DOM) sits behind a trait in `bridge-wallet-core`. This crate provides
//! test-friendly implementations that:
//! - Return scripted values
//! - Record every request for assertions
//! - Never touch the network or a browser
//!
//! Usage: swap real implementations for nullables in tests.

pub mod backend;
pub mod page;
pub mod wallet;

pub use backend::{NullBackend, PrepareReply};
pub use page::{ElementSpec, NullPage};
pub use wallet::{NullTransaction, NullWallet, WalletCall};
