//! Nullable wallet: a scripted extension that records every request.

use std::cell::{Cell, RefCell};

use tokio::sync::Notify;

use bridge_types::{BridgeError, ConnectOptions, RawTransaction, SendReceipt};
use bridge_wallet_core::{Wallet, WalletTransaction};

/// Transaction object of the null wallet: the raw bytes, untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullTransaction(pub Vec<u8>);

impl WalletTransaction for NullTransaction {
    fn from_bytes(raw: &RawTransaction) -> Result<Self, BridgeError> {
        if raw.is_empty() {
            return Err(BridgeError::InvalidTransaction("empty transaction".into()));
        }
        Ok(Self(raw.as_bytes().to_vec()))
    }

    fn serialize(&self) -> RawTransaction {
        RawTransaction::new(self.0.clone())
    }
}

/// A request the page made of the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletCall {
    Connect(ConnectOptions),
    Disconnect,
    SignTransaction(Vec<u8>),
    SignAndSendTransaction(Vec<u8>),
}

/// A test wallet extension.
///
/// Starts disconnected and untrusted. Signing echoes the input unless
/// [`NullWallet::signing_to`] scripts a result.
pub struct NullWallet {
    connected: Cell<bool>,
    trusted: Cell<bool>,
    public_key: RefCell<String>,
    signed_bytes: RefCell<Option<Vec<u8>>>,
    signature: RefCell<String>,
    reject_signing: Cell<bool>,
    reject_disconnect: Cell<bool>,
    hold_approvals: Cell<bool>,
    approval: Notify,
    calls: RefCell<Vec<WalletCall>>,
}

impl NullWallet {
    pub fn new() -> Self {
        Self {
            connected: Cell::new(false),
            trusted: Cell::new(false),
            public_key: RefCell::new("NuLLWaLLet1111111111111111111111111111111111".into()),
            signed_bytes: RefCell::new(None),
            signature: RefCell::new("5igNaTuRe".into()),
            reject_signing: Cell::new(false),
            reject_disconnect: Cell::new(false),
            hold_approvals: Cell::new(false),
            approval: Notify::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Already connected as `public_key`.
    pub fn connected_as(self, public_key: &str) -> Self {
        self.connected.set(true);
        self.trusted.set(true);
        *self.public_key.borrow_mut() = public_key.to_string();
        self
    }

    /// The user approved this site before, so a trusted-only connect succeeds.
    pub fn trusted(self) -> Self {
        self.trusted.set(true);
        self
    }

    /// Signed transactions serialize to `bytes`.
    pub fn signing_to(self, bytes: Vec<u8>) -> Self {
        *self.signed_bytes.borrow_mut() = Some(bytes);
        self
    }

    /// Signature reported by sign-and-send.
    pub fn with_signature(self, signature: &str) -> Self {
        *self.signature.borrow_mut() = signature.to_string();
        self
    }

    /// The user declines every signing prompt.
    pub fn rejecting_signatures(self) -> Self {
        self.reject_signing.set(true);
        self
    }

    pub fn rejecting_disconnect(self) -> Self {
        self.reject_disconnect.set(true);
        self
    }

    /// Signing waits for [`NullWallet::approve`] instead of completing at once.
    pub fn holding_approvals(self) -> Self {
        self.hold_approvals.set(true);
        self
    }

    /// Let one held signing prompt through.
    pub fn approve(&self) {
        self.approval.notify_one();
    }

    /// Flip the connection as if the user acted in the extension UI.
    pub fn set_connected(&self, connected: bool) {
        self.connected.set(connected);
    }

    /// All requests made so far (for assertions).
    pub fn calls(&self) -> Vec<WalletCall> {
        self.calls.borrow().clone()
    }

    pub fn sign_requests(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    WalletCall::SignTransaction(_) | WalletCall::SignAndSendTransaction(_)
                )
            })
            .count()
    }

    fn record(&self, call: WalletCall) {
        self.calls.borrow_mut().push(call);
    }

    async fn await_user(&self) -> Result<(), BridgeError> {
        if self.hold_approvals.get() {
            self.approval.notified().await;
        }
        if self.reject_signing.get() {
            return Err(BridgeError::WalletRejection("User rejected the request.".into()));
        }
        Ok(())
    }
}

impl Default for NullWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl Wallet for NullWallet {
    type Transaction = NullTransaction;

    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn public_key(&self) -> Option<String> {
        self.connected
            .get()
            .then(|| self.public_key.borrow().clone())
    }

    async fn connect(&self, options: ConnectOptions) -> Result<(), BridgeError> {
        self.record(WalletCall::Connect(options));
        if options.only_if_trusted && !self.trusted.get() {
            return Err(BridgeError::WalletRejection("User rejected the request.".into()));
        }
        self.connected.set(true);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), BridgeError> {
        self.record(WalletCall::Disconnect);
        if self.reject_disconnect.get() {
            return Err(BridgeError::WalletRejection("disconnect failed".into()));
        }
        self.connected.set(false);
        Ok(())
    }

    async fn sign_transaction(&self, tx: NullTransaction) -> Result<NullTransaction, BridgeError> {
        self.record(WalletCall::SignTransaction(tx.0.clone()));
        self.await_user().await?;
        let signed = self.signed_bytes.borrow().clone();
        Ok(signed.map(NullTransaction).unwrap_or(tx))
    }

    async fn sign_and_send_transaction(
        &self,
        tx: NullTransaction,
    ) -> Result<SendReceipt, BridgeError> {
        self.record(WalletCall::SignAndSendTransaction(tx.0));
        self.await_user().await?;
        Ok(SendReceipt {
            signature: self.signature.borrow().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn untrusted_connect_is_rejected() {
        let wallet = NullWallet::new();
        let result = wallet.connect(ConnectOptions::TRUSTED_ONLY).await;
        assert!(result.unwrap_err().is_rejection());
        assert!(!wallet.is_connected());
        assert_eq!(wallet.public_key(), None);
    }

    #[tokio::test]
    async fn trusted_connect_succeeds() {
        let wallet = NullWallet::new().trusted();
        wallet.connect(ConnectOptions::TRUSTED_ONLY).await.unwrap();
        assert!(wallet.is_connected());
        assert!(wallet.public_key().is_some());
    }

    #[tokio::test]
    async fn signing_echoes_unless_scripted() {
        let wallet = NullWallet::new();
        let signed = wallet
            .sign_transaction(NullTransaction(vec![7, 7]))
            .await
            .unwrap();
        assert_eq!(signed.0, vec![7, 7]);

        let wallet = NullWallet::new().signing_to(vec![0, 1]);
        let signed = wallet
            .sign_transaction(NullTransaction(vec![7, 7]))
            .await
            .unwrap();
        assert_eq!(signed.serialize().as_bytes(), &[0, 1]);
    }

    #[test]
    fn empty_bytes_do_not_parse() {
        assert!(NullTransaction::from_bytes(&RawTransaction::default()).is_err());
    }
}
