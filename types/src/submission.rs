//! Request and response bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

use crate::EncodedTransaction;

/// A signed transaction handed back to the backend for broadcast.
///
/// Sent form-encoded as `txId=…&encodedSerializedTx=…`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxSubmission {
    /// Opaque identifier issued by the backend alongside the unsigned transaction.
    pub tx_id: String,
    pub encoded_serialized_tx: EncodedTransaction,
}

/// JSON body posted to a transaction-preparation endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareRequest {
    pub public_key: String,
}

/// JSON body returned by a transaction-preparation endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedTransaction {
    pub encoded_tx: EncodedTransaction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_uses_camel_case_fields() {
        let submission = TxSubmission {
            tx_id: "tx1".into(),
            encoded_serialized_tx: EncodedTransaction::parse("AAE=").unwrap(),
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["txId"], "tx1");
        assert_eq!(json["encodedSerializedTx"], "AAE=");
    }

    #[test]
    fn prepare_request_uses_snake_case_key() {
        let json = serde_json::to_string(&PrepareRequest {
            public_key: "abc".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"public_key":"abc"}"#);
    }

    #[test]
    fn prepared_transaction_rejects_invalid_payload() {
        let parsed: Result<PreparedTransaction, _> =
            serde_json::from_str(r#"{"encodedTx":"%%%%"}"#);
        assert!(parsed.is_err());
    }
}
