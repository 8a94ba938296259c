use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 over the decimal nonce, the payload and the previous hash,
/// concatenated in that order, returned as lowercase hex.
pub fn digest(nonce: u64, data: &str, previous_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(nonce.to_string().as_bytes());
    hasher.update(data.as_bytes());
    hasher.update(previous_hash.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::{DIGEST_HEX_LEN, digest};
    use sha2::{Digest, Sha256};

    #[test]
    fn digest_is_deterministic() {
        let a = digest(42, "Block 1", "abc");
        let b = digest(42, "Block 1", "abc");
        assert_eq!(a, b);
        assert_eq!(a.len(), DIGEST_HEX_LEN);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn digest_changes_with_every_input() {
        let base = digest(0, "Block 1", "abc");
        assert_ne!(base, digest(1, "Block 1", "abc"));
        assert_ne!(base, digest(0, "Block 2", "abc"));
        assert_ne!(base, digest(0, "Block 1", "abd"));
    }

    #[test]
    fn digest_matches_known_sha256_of_concatenation() {
        // sha256("0" + "Genesis Block" + "0")
        let expected = hex::encode(Sha256::digest(b"0Genesis Block0"));
        assert_eq!(digest(0, "Genesis Block", "0"), expected);
    }
}
