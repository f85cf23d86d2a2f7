//! Password digest helpers.

use sha2::{Digest, Sha256};

/// Hash a password into a hex-encoded SHA-256 digest
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check a password against a stored digest
pub fn verify_password(password: &str, digest: &str) -> bool {
    hash_password(password) == digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let digest = hash_password("admin123");
        assert!(verify_password("admin123", &digest));
        assert!(!verify_password("admin124", &digest));
    }

    #[test]
    fn digest_is_stable_hex() {
        let digest = hash_password("abc");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, hash_password("abc"));
    }
}
