//! One-way credential hashing.
//!
//! bcrypt embeds its salt and work factor in the produced hash string, so a
//! stored hash is self-describing and the cost can be raised without a
//! migration. Verification is a constant-time comparison inside the crate.

use inmokit_core::{CoreError, CoreResult};

/// Hash a raw secret for storage.
///
/// Hashing failure is an internal fault (it does not depend on caller
/// input); the raw secret is never logged.
pub fn hash_secret(secret: &str) -> CoreResult<String> {
    bcrypt::hash(secret, bcrypt::DEFAULT_COST).map_err(|e| {
        tracing::error!(error = %e, "secret hashing failed");
        CoreError::Internal
    })
}

/// Verify a raw secret against a stored hash.
///
/// A mismatch is a normal `Ok(false)`, never an error. An error here means
/// the stored hash itself is unreadable.
pub fn verify_secret(secret: &str, stored_hash: &str) -> CoreResult<bool> {
    bcrypt::verify(secret, stored_hash).map_err(|e| {
        tracing::error!(error = %e, "stored secret hash is unreadable");
        CoreError::Internal
    })
}
