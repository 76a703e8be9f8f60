//! Transport codec: standard base64 between raw transaction bytes and text.
//!
//! Uses the standard alphabet (`A-Z a-z 0-9 + /`) with `=` padding.
//! Decoding is strict: padding must be canonical and the trailing bits of
//! the last group must be zero, so every accepted string re-encodes to
//! itself.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

/// Errors produced while decoding transport text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid character {byte:#04x} at offset {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },

    #[error("invalid encoded length")]
    InvalidLength,

    #[error("invalid padding")]
    InvalidPadding,

    #[error("non-canonical trailing bits at offset {offset}")]
    InvalidTrailingBits { offset: usize },
}

impl From<base64::DecodeError> for CodecError {
    fn from(err: base64::DecodeError) -> Self {
        match err {
            base64::DecodeError::InvalidByte(offset, byte) => {
                CodecError::InvalidCharacter { offset, byte }
            }
            base64::DecodeError::InvalidLength(_) => CodecError::InvalidLength,
            base64::DecodeError::InvalidLastSymbol(offset, _) => {
                CodecError::InvalidTrailingBits { offset }
            }
            base64::DecodeError::InvalidPadding => CodecError::InvalidPadding,
        }
    }
}

/// Encode raw bytes as padded standard base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode padded standard base64 into raw bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD.decode(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_roundtrips() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn known_vectors() {
        assert_eq!(encode(&[0, 1]), "AAE=");
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
        assert_eq!(decode("Zm9vYg==").unwrap(), b"foob");
    }

    #[test]
    fn bytes_map_positionally() {
        // 0xFB 0xFF encodes to "+/8=" and exercises both non-alphanumeric symbols.
        assert_eq!(encode(&[0xfb, 0xff]), "+/8=");
        assert_eq!(decode("+/8=").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn rejects_character_outside_alphabet() {
        let err = decode("AA*=").unwrap_err();
        assert_eq!(err, CodecError::InvalidCharacter { offset: 2, byte: b'*' });
    }

    #[test]
    fn rejects_url_safe_alphabet() {
        assert!(matches!(
            decode("-_8="),
            Err(CodecError::InvalidCharacter { offset: 0, .. })
        ));
    }

    #[test]
    fn rejects_missing_padding() {
        assert!(decode("AAE").is_err());
    }

    #[test]
    fn rejects_bad_length() {
        assert!(decode("A").is_err());
    }

    #[test]
    fn rejects_non_canonical_trailing_bits() {
        // "AAF=" decodes to the same bytes as "AAE=" in lenient decoders.
        assert!(matches!(
            decode("AAF="),
            Err(CodecError::InvalidTrailingBits { .. })
        ));
    }
}
