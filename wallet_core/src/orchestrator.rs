//! Signing flows: decode, hand to the wallet, re-encode, forward.
//!
//! Two flows exist:
//! - **sign and submit**: the wallet only signs; the signed transaction goes
//!   back to the backend, whose HTML response replaces the modal content.
//! - **sign and send**: the backend prepares a transaction for the connected
//!   key and the wallet signs and broadcasts it itself.
//!
//! Every flow logs its own failure and returns it. The backend is never
//! contacted with a partially signed transaction.

use std::rc::Rc;

use tracing::{debug, error, info};

use bridge_types::{BridgeError, EncodedTransaction, PrepareRequest, SendReceipt, TxSubmission};

use crate::backend::Backend;
use crate::config::DomConfig;
use crate::in_flight::InFlight;
use crate::page::{ElementId, Page};
use crate::wallet::{Wallet, WalletTransaction};

/// What a successful sign-and-submit produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub submission: TxSubmission,
    /// Element whose content was replaced with the backend response.
    pub swapped: Option<ElementId>,
}

pub struct SigningOrchestrator<W, B, P> {
    wallet: Rc<W>,
    backend: B,
    page: Rc<P>,
    dom: DomConfig,
    in_flight: InFlight,
}

impl<W: Wallet, B: Backend, P: Page> SigningOrchestrator<W, B, P> {
    pub fn new(wallet: Rc<W>, backend: B, page: Rc<P>, dom: DomConfig) -> Self {
        Self {
            wallet,
            backend,
            page,
            dom,
            in_flight: InFlight::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Sign the transaction carried by `trigger` and submit it to the backend.
    ///
    /// Attributes are read at call time, after the connection check.
    pub async fn sign_and_submit(&self, trigger: ElementId) -> Result<SubmitOutcome, BridgeError> {
        report(self.try_sign_and_submit(trigger).await)
    }

    /// Fetch a transaction from `endpoint` and have the wallet sign and broadcast it.
    pub async fn sign_and_send(&self, endpoint: &str) -> Result<SendReceipt, BridgeError> {
        report(self.try_sign_and_send(endpoint).await)
    }

    /// Decode, sign and re-encode without touching the backend.
    pub async fn sign_encoded(
        &self,
        tx_id: String,
        encoded_tx: &str,
    ) -> Result<TxSubmission, BridgeError> {
        let encoded = EncodedTransaction::parse(encoded_tx)?;
        let tx = W::Transaction::from_bytes(&encoded.decode())?;
        let signed = self.wallet.sign_transaction(tx).await?;
        Ok(TxSubmission {
            tx_id,
            encoded_serialized_tx: signed.serialize().encode(),
        })
    }

    async fn try_sign_and_submit(&self, trigger: ElementId) -> Result<SubmitOutcome, BridgeError> {
        if !self.wallet.is_connected() {
            return Err(BridgeError::WalletDisconnected);
        }

        let encoded_tx = self.required_attribute(trigger, &self.dom.encoded_tx_attr)?;
        let tx_id = self.required_attribute(trigger, &self.dom.tx_id_attr)?;
        let _guard = self.in_flight.acquire(format!("tx:{tx_id}"))?;

        let submission = self.sign_encoded(tx_id, &encoded_tx).await?;
        let html = self.backend.submit_transaction(&submission).await?;
        info!(tx_id = %submission.tx_id, "Submitted signed transaction");

        let swapped = self
            .page
            .query_selector(self.page.root(), &self.dom.modal_content_selector);
        match swapped {
            Some(content) => self.page.replace_content(content, &html),
            None => debug!(
                selector = %self.dom.modal_content_selector,
                "no swap target for submission response"
            ),
        }

        Ok(SubmitOutcome {
            submission,
            swapped,
        })
    }

    async fn try_sign_and_send(&self, endpoint: &str) -> Result<SendReceipt, BridgeError> {
        if !self.wallet.is_connected() {
            return Err(BridgeError::WalletDisconnected);
        }
        let public_key = self
            .wallet
            .public_key()
            .ok_or(BridgeError::WalletDisconnected)?;
        let _guard = self.in_flight.acquire(format!("endpoint:{endpoint}"))?;

        let prepared = self
            .backend
            .prepare_transaction(endpoint, &PrepareRequest { public_key })
            .await?;
        let tx = W::Transaction::from_bytes(&prepared.encoded_tx.decode())?;
        let receipt = self.wallet.sign_and_send_transaction(tx).await?;

        info!("Transaction signature: {}", receipt.signature);
        Ok(receipt)
    }

    fn required_attribute(&self, element: ElementId, name: &str) -> Result<String, BridgeError> {
        self.page
            .attribute(element, name)
            .ok_or_else(|| BridgeError::MissingAttribute(name.to_string()))
    }
}

/// Log a flow failure and hand it back unchanged.
fn report<T>(result: Result<T, BridgeError>) -> Result<T, BridgeError> {
    match &result {
        Err(BridgeError::WalletDisconnected) => info!("Wallet is not connected."),
        Err(e) => error!("Failed to process transaction: {e}"),
        Ok(_) => {}
    }
    result
}
