//! Admin credential check.
//!
//! Replaces the source's hardcoded client-side password with a server-side
//! configured key. Comparison runs over fixed-length SHA-256 digests so the
//! check does not leak the secret's length or a matching prefix through
//! timing.

use sha2::{Digest, Sha256};

/// Guard holding the digest of the configured admin access key.
#[derive(Clone)]
pub struct AdminGuard {
    key_digest: [u8; 32],
}

impl AdminGuard {
    pub fn new(access_key: &str) -> Self {
        Self {
            key_digest: digest(access_key),
        }
    }

    /// Constant-time comparison of the presented key against the configured one.
    pub fn verify(&self, presented: &str) -> bool {
        let presented = digest(presented);
        let mut diff = 0u8;
        for (a, b) in self.key_digest.iter().zip(presented.iter()) {
            diff |= a ^ b;
        }
        diff == 0
    }
}

fn digest(input: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_configured_key() {
        let guard = AdminGuard::new("relief-ops-2024");
        assert!(guard.verify("relief-ops-2024"));
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let guard = AdminGuard::new("relief-ops-2024");
        assert!(!guard.verify("relief-ops-2025"));
        assert!(!guard.verify(""));
        assert!(!guard.verify("relief-ops-2024 "));
    }
}
