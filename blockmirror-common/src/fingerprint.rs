use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 of an object's raw bytes, rendered as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentFingerprint {
    hex: String,
}

impl ContentFingerprint {
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            hex: calc_sha256_from_slice(data),
        }
    }

    pub fn as_hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

pub fn calc_sha256_from_slice(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_length_is_64() {
        let fingerprint = ContentFingerprint::from_bytes(b"hello, world!");
        assert_eq!(fingerprint.as_hex().len(), 64);
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let fingerprint = ContentFingerprint::from_bytes(b"hello, world!");
        insta::assert_snapshot!(
            fingerprint.as_hex(),
            @"68e656b251e67e8358bef8483ab0d51c6619f3e7a1a9f0e75838d41ff368f728"
        );
    }

    #[test]
    fn test_fingerprint_of_empty_input() {
        let fingerprint = ContentFingerprint::from_bytes(b"");
        assert_eq!(
            fingerprint.as_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_different_content_different_fingerprint() {
        let a = ContentFingerprint::from_bytes(b"a");
        let b = ContentFingerprint::from_bytes(b"b");
        assert_ne!(a, b);
    }
}
