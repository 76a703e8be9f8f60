//! Capabilities the page borrows from the wallet extension.

use bridge_types::{
    BridgeError, ConnectOptions, RawTransaction, SendReceipt, WalletConnectionState,
};

/// The wallet's own transaction object.
///
/// Parsing and serialization belong to the wallet; this layer never looks
/// inside the bytes.
pub trait WalletTransaction: Sized {
    /// Parse a serialized transaction into the wallet's object.
    fn from_bytes(raw: &RawTransaction) -> Result<Self, BridgeError>;

    /// Serialize back to wire bytes.
    fn serialize(&self) -> RawTransaction;
}

/// A browser wallet extension.
///
/// Every async method may suspend indefinitely while the extension waits
/// for the user, and may fail with [`BridgeError::WalletRejection`].
#[allow(async_fn_in_trait)]
pub trait Wallet {
    type Transaction: WalletTransaction;

    fn is_connected(&self) -> bool;

    /// Base58 public key of the connected account, if any.
    fn public_key(&self) -> Option<String>;

    fn connection_state(&self) -> WalletConnectionState {
        WalletConnectionState::from_connected(self.is_connected())
    }

    async fn connect(&self, options: ConnectOptions) -> Result<(), BridgeError>;

    async fn disconnect(&self) -> Result<(), BridgeError>;

    async fn sign_transaction(
        &self,
        tx: Self::Transaction,
    ) -> Result<Self::Transaction, BridgeError>;

    /// Sign and broadcast through the wallet's own RPC connection.
    async fn sign_and_send_transaction(
        &self,
        tx: Self::Transaction,
    ) -> Result<SendReceipt, BridgeError>;
}

/// Public key to attach to page requests: empty when there is no wallet
/// or it is not connected.
pub fn public_key_of<W: Wallet>(wallet: Option<&W>) -> String {
    match wallet {
        Some(w) if w.is_connected() => w.public_key().unwrap_or_default(),
        _ => String::new(),
    }
}
