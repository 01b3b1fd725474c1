/// Base64 transport encoding
///
/// The generation API speaks base64-encoded PNG in both directions; these
/// helpers keep the encoding choice (standard alphabet, padded) in one place.

use base64::{engine::general_purpose, Engine};

/// Encode bytes with the standard base64 alphabet
pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode a standard base64 string back to bytes
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let payloads: [&[u8]; 4] = [b"", b"a", b"\x89PNG\r\n\x1a\n", &[0xff; 33]];
        for payload in payloads {
            let encoded = encode_base64(payload);
            assert_eq!(decode_base64(&encoded).unwrap(), payload);
        }
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(decode_base64("not base64!!").is_err());
    }
}
