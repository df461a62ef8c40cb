//! Password hashing helpers.
//!
//! SHA-256 hex digests, verified with a timing-safe comparison. Hashes live
//! in the user table (builtin or `users.json`).

use sha2::{Digest, Sha256};

/// SHA-256 of the password, lowercase hex. The format stored in the user
/// table and printed by the `hash-password` CLI helper.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Verifies a password against a stored hex digest.
/// Hashes the candidate and compares digests in constant time.
pub fn verify_password(password: &str, stored_hex: &str) -> bool {
    let Ok(stored) = hex::decode(stored_hex) else {
        return false;
    };
    let computed = Sha256::digest(password.as_bytes());
    constant_time_eq(&computed, &stored)
}

// Timing-safe compare: always touches every byte, no early exit.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
