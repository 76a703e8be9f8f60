#![no_main]

use libfuzzer_sys::fuzz_target;

use bridge_types::{codec, EncodedTransaction};

// Decoding arbitrary text never panics, and whatever decodes re-encodes
// to the exact same text.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(bytes) = codec::decode(text) {
            assert_eq!(codec::encode(&bytes), text);
            let encoded = EncodedTransaction::parse(text).expect("decoded text must parse");
            assert_eq!(encoded.decode().as_bytes(), bytes.as_slice());
        }
    }

    // Raw input as transaction bytes.
    let text = codec::encode(data);
    assert_eq!(codec::decode(&text).expect("encoded text must decode"), data);
});
