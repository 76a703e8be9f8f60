//! Transaction payloads as they travel between backend, page and wallet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::codec::{self, CodecError};

/// A serialized transaction, opaque to this layer.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct RawTransaction(Vec<u8>);

impl RawTransaction {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode for transport.
    pub fn encode(&self) -> EncodedTransaction {
        EncodedTransaction(codec::encode(&self.0))
    }
}

impl From<Vec<u8>> for RawTransaction {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for RawTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawTransaction({} bytes)", self.0.len())
    }
}

/// Base64 text of a serialized transaction.
///
/// Only constructed from text that decodes cleanly, or by encoding bytes,
/// so [`EncodedTransaction::decode`] never fails.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedTransaction(String);

impl EncodedTransaction {
    /// Validate transport text.
    pub fn parse(text: impl Into<String>) -> Result<Self, CodecError> {
        let text = text.into();
        codec::decode(&text)?;
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> RawTransaction {
        // Validated on construction.
        RawTransaction(codec::decode(&self.0).unwrap_or_default())
    }
}

impl FromStr for EncodedTransaction {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EncodedTransaction {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EncodedTransaction> for String {
    fn from(value: EncodedTransaction) -> Self {
        value.0
    }
}

impl fmt::Debug for EncodedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedTransaction({})", self.0)
    }
}

impl fmt::Display for EncodedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_garbage() {
        assert!(EncodedTransaction::parse("not base64!").is_err());
    }

    #[test]
    fn raw_encode_then_decode() {
        let raw = RawTransaction::new(vec![0, 1]);
        let encoded = raw.encode();
        assert_eq!(encoded.as_str(), "AAE=");
        assert_eq!(encoded.decode(), raw);
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<EncodedTransaction, _> = serde_json::from_str("\"AAE=\"");
        assert!(ok.is_ok());
        let bad: Result<EncodedTransaction, _> = serde_json::from_str("\"A*E=\"");
        assert!(bad.is_err());
    }
}
