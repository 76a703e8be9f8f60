use proptest::prelude::*;

use bridge_types::{codec, EncodedTransaction, RawTransaction};

proptest! {
    /// decode(encode(B)) == B for arbitrary bytes.
    #[test]
    fn bytes_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let text = codec::encode(&bytes);
        prop_assert_eq!(codec::decode(&text).unwrap(), bytes);
    }

    /// encode(decode(T)) == T for every valid transport string.
    #[test]
    fn text_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let text = codec::encode(&bytes);
        let decoded = codec::decode(&text).unwrap();
        prop_assert_eq!(codec::encode(&decoded), text);
    }

    /// Encoded length is always a multiple of four and grows by 4/3.
    #[test]
    fn encoded_length(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let text = codec::encode(&bytes);
        prop_assert_eq!(text.len() % 4, 0);
        prop_assert_eq!(text.len(), bytes.len().div_ceil(3) * 4);
    }

    /// Any string containing a byte outside the alphabet is rejected.
    #[test]
    fn foreign_character_rejected(
        bytes in prop::collection::vec(any::<u8>(), 3..64),
        bad in prop::sample::select(vec!['*', '-', '_', '.', ' ', '!', '#']),
        pos in any::<prop::sample::Index>(),
    ) {
        let mut text: Vec<char> = codec::encode(&bytes).chars().collect();
        let idx = pos.index(text.len());
        text[idx] = bad;
        let text: String = text.into_iter().collect();
        prop_assert!(codec::decode(&text).is_err());
    }

    /// EncodedTransaction wraps the same law.
    #[test]
    fn encoded_transaction_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let raw = RawTransaction::new(bytes);
        let encoded = raw.encode();
        let reparsed = EncodedTransaction::parse(encoded.as_str()).unwrap();
        prop_assert_eq!(reparsed.decode(), raw);
    }
}
