//! Nullable backend: record requests and answer from a script.

use std::cell::RefCell;
use std::collections::HashMap;

use bridge_types::{BridgeError, EncodedTransaction, PrepareRequest, PreparedTransaction, TxSubmission};
use bridge_wallet_core::Backend;

/// Scripted answer for a preparation endpoint.
#[derive(Clone, Debug)]
pub enum PrepareReply {
    Transaction(EncodedTransaction),
    Status(u16),
}

/// A test backend that records requests instead of sending them.
pub struct NullBackend {
    submissions: RefCell<Vec<TxSubmission>>,
    prepare_requests: RefCell<Vec<(String, PrepareRequest)>>,
    submit_reply: RefCell<Result<String, u16>>,
    prepare_replies: RefCell<HashMap<String, PrepareReply>>,
}

impl NullBackend {
    pub fn new() -> Self {
        Self {
            submissions: RefCell::new(Vec::new()),
            prepare_requests: RefCell::new(Vec::new()),
            submit_reply: RefCell::new(Ok(String::new())),
            prepare_replies: RefCell::new(HashMap::new()),
        }
    }

    /// HTML returned for submissions.
    pub fn submit_responds_with(self, html: &str) -> Self {
        *self.submit_reply.borrow_mut() = Ok(html.to_string());
        self
    }

    pub fn submit_fails_with_status(self, status: u16) -> Self {
        *self.submit_reply.borrow_mut() = Err(status);
        self
    }

    pub fn prepares(self, endpoint: &str, encoded_tx: &str) -> Self {
        let encoded = EncodedTransaction::parse(encoded_tx).expect("scripted payload must be base64");
        self.prepare_replies
            .borrow_mut()
            .insert(endpoint.to_string(), PrepareReply::Transaction(encoded));
        self
    }

    pub fn prepare_fails_with_status(self, endpoint: &str, status: u16) -> Self {
        self.prepare_replies
            .borrow_mut()
            .insert(endpoint.to_string(), PrepareReply::Status(status));
        self
    }

    /// All submissions "sent" (for assertions).
    pub fn submissions(&self) -> Vec<TxSubmission> {
        self.submissions.borrow().clone()
    }

    pub fn prepare_requests(&self) -> Vec<(String, PrepareRequest)> {
        self.prepare_requests.borrow().clone()
    }

    /// Total requests of any kind.
    pub fn request_count(&self) -> usize {
        self.submissions.borrow().len() + self.prepare_requests.borrow().len()
    }

}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn http_status(status: u16) -> BridgeError {
    BridgeError::Network(format!("backend returned HTTP {status}"))
}

impl Backend for NullBackend {
    async fn submit_transaction(&self, submission: &TxSubmission) -> Result<String, BridgeError> {
        self.submissions.borrow_mut().push(submission.clone());
        self.submit_reply.borrow().clone().map_err(http_status)
    }

    async fn prepare_transaction(
        &self,
        endpoint: &str,
        request: &PrepareRequest,
    ) -> Result<PreparedTransaction, BridgeError> {
        self.prepare_requests
            .borrow_mut()
            .push((endpoint.to_string(), request.clone()));
        match self.prepare_replies.borrow().get(endpoint) {
            Some(PrepareReply::Transaction(encoded_tx)) => Ok(PreparedTransaction {
                encoded_tx: encoded_tx.clone(),
            }),
            Some(PrepareReply::Status(status)) => Err(http_status(*status)),
            None => Err(http_status(404)),
        }
    }
}
