//! Wallet bridge core.
//!
//! Lets a web page drive a browser wallet extension:
//! - Capability traits for the wallet, the backend and the page DOM
//! - Sign-and-submit and sign-and-send flows
//! - Connect/disconnect handling and control visibility
//! - Idempotent mounting of swapped-in modal content
//! - An HTTP backend client and TOML configuration

pub mod backend;
pub mod bridge;
pub mod config;
pub mod connection;
pub mod in_flight;
pub mod mount;
pub mod orchestrator;
pub mod page;
pub mod wallet;

#[cfg(not(target_arch = "wasm32"))]
pub use backend::HttpBackend;
pub use backend::Backend;
pub use bridge::Bridge;
pub use bridge_types::BridgeError;
pub use config::{BridgeConfig, DomConfig};
pub use connection::ConnectionSync;
pub use in_flight::{InFlight, InFlightGuard};
pub use mount::{Action, Bindings};
pub use orchestrator::{SigningOrchestrator, SubmitOutcome};
pub use page::{ElementId, Page};
pub use wallet::{public_key_of, Wallet, WalletTransaction};
