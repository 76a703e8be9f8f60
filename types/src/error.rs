//! Top-level error type shared across crates.

use thiserror::Error;

use crate::codec::CodecError;

/// Everything that can abort a bridge flow.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Solana wallet extension not found")]
    WalletAbsent,

    #[error("Wallet is not connected.")]
    WalletDisconnected,

    #[error("encoding error: {0}")]
    Encoding(#[from] CodecError),

    #[error("wallet rejected the request: {0}")]
    WalletRejection(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("element is missing the `{0}` attribute")]
    MissingAttribute(String),

    #[error("wallet could not parse transaction: {0}")]
    InvalidTransaction(String),

    #[error("a flow for {0} is already in progress")]
    FlowInProgress(String),

    #[error("config error: {0}")]
    Config(String),
}

impl BridgeError {
    /// Whether the user (or the extension on their behalf) declined.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::WalletRejection(_))
    }
}
