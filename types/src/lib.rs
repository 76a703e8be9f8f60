//! Fundamental types for the wallet bridge.
//!
//! This crate defines what every other crate in the workspace passes around:
//! the base64 transport codec, encoded and raw transaction payloads, backend
//! request bodies, wallet connection state, and the shared error type.

pub mod codec;
pub mod encoded;
pub mod error;
pub mod state;
pub mod submission;

pub use codec::CodecError;
pub use encoded::{EncodedTransaction, RawTransaction};
pub use error::BridgeError;
pub use state::{ConnectOptions, SendReceipt, WalletConnectionState, WalletEvent};
pub use submission::{PrepareRequest, PreparedTransaction, TxSubmission};
